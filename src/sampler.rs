//! Height synthesis for a single coordinate.
//!
//! Stages run cheapest-rejection first: plateau stepping, domain warp,
//! octave sum + threshold, vertical remap, then the final blend into
//! `[base_height, base_height + height_offset]`. `None` means "no terrain".

use crate::config::{LandformParams, RemapMode};
use crate::noise::{NoiseSet, clamp01};
use crate::octaves::OctaveCombiner;
use crate::plateau::PlateauStepField;
use crate::remap::VerticalRemapTable;
use crate::warp::warp;

/// The value looked up in the vertical remap table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RemapQuery {
    /// The clamped octave total of the sample.
    Total,
    /// A normalized vertical position in `[0, 1]`.
    Level(f64),
}

impl RemapQuery {
    /// Query for a given mode; `level` is ignored in `Total` mode.
    pub fn for_mode(mode: RemapMode, level: f64) -> Self {
        match mode {
            RemapMode::Total => RemapQuery::Total,
            RemapMode::Vertical => RemapQuery::Level(level),
        }
    }
}

/// Borrowing view of one landform over one seed's noise. Cheap to build,
/// `Copy`, and safe to share across threads.
#[derive(Clone, Copy, Debug)]
pub struct HeightSampler<'a> {
    params: &'a LandformParams,
    noise: &'a NoiseSet,
}

impl<'a> HeightSampler<'a> {
    pub fn new(params: &'a LandformParams, noise: &'a NoiseSet) -> Self {
        Self { params, noise }
    }

    pub fn params(&self) -> &'a LandformParams {
        self.params
    }

    pub fn plateau(&self) -> PlateauStepField<'a> {
        PlateauStepField::new(&self.params.plateau, self.noise)
    }

    /// Octave total before clamping or threshold rejection.
    pub fn octave_total(&self, x: f64, z: f64) -> f64 {
        let (wx, wz) = warp(self.noise, x, z);
        OctaveCombiner::new(self.params.octaves(), self.params.noise_scale)
            .total(&self.noise.main, wx, wz)
    }

    /// Height at `(x, z)` with the octave total as remap query.
    pub fn sample(&self, x: f64, z: f64) -> Option<f64> {
        self.sample_with(x, z, RemapQuery::Total)
    }

    pub fn sample_with(&self, x: f64, z: f64, query: RemapQuery) -> Option<f64> {
        let p = self.params;

        let step = self.plateau().step_factor(x, z)?;

        let total = clamp01(self.octave_total(x, z));
        if total < p.threshold {
            return None;
        }

        let v = match query {
            RemapQuery::Total => total,
            RemapQuery::Level(level) => level,
        };
        let yfactor = VerticalRemapTable::new(p.remap_keys()).factor(v);

        let combined = clamp01(total * yfactor * step);
        Some(p.base_height + p.height_offset * combined)
    }
}

/// One-shot sampling: builds the seed's noise sources and samples once.
/// Bulk callers should build a [`NoiseSet`] once and reuse a [`HeightSampler`].
pub fn sample(params: &LandformParams, seed: i32, x: f64, z: f64) -> Option<f64> {
    let noise = NoiseSet::new(seed);
    HeightSampler::new(params, &noise).sample(x, z)
}
