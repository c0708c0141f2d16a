//! Radial plateau stepping.
//!
//! The plane is cut into square cells of `2 * base_radius`. Each cell owns one
//! plateau: a stack of concentric rings around a jittered center, each ring
//! `radius_step` times the size of the one outside it. A point's step factor
//! is the highest tier it reaches in any of the nine cells around it, so
//! plateaus that spill over a cell border still claim their points.

use crate::config::PlateauSettings;
use crate::noise::NoiseSet;

/// Maximum center displacement as a fraction of the cell size.
const JITTER_FRACTION: f64 = 0.2;
const JITTER_FREQUENCY: f64 = 0.1;
const JITTER_Z_OFFSET: f64 = 1000.0;

const SHAPE_AMPLITUDE: f64 = 0.25;
const SHAPE_FREQUENCY: f64 = 0.02;
const SHAPE_CELL_OFFSET: f64 = 100.0;
const SHAPE_TIER_OFFSET: f64 = 50.0;

#[derive(Clone, Copy, Debug)]
pub struct PlateauStepField<'a> {
    settings: &'a PlateauSettings,
    noise: &'a NoiseSet,
}

impl<'a> PlateauStepField<'a> {
    pub fn new(settings: &'a PlateauSettings, noise: &'a NoiseSet) -> Self {
        Self { settings, noise }
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.is_enabled()
    }

    #[inline]
    fn cell_size(&self) -> f64 {
        2.0 * self.settings.base_radius
    }

    /// Cell index containing a world coordinate.
    pub fn cell_of(&self, x: f64, z: f64) -> (i64, i64) {
        let size = self.cell_size();
        ((x / size).floor() as i64, (z / size).floor() as i64)
    }

    /// Jittered plateau center of a cell.
    pub fn cell_center(&self, cx: i64, cz: i64) -> (f64, f64) {
        let size = self.cell_size();
        let (fx, fz) = (cx as f64, cz as f64);
        let jx = self.noise.warp_x.noise2(fx * JITTER_FREQUENCY, fz * JITTER_FREQUENCY);
        let jz = self.noise.warp_z.noise2(
            fx * JITTER_FREQUENCY + JITTER_Z_OFFSET,
            fz * JITTER_FREQUENCY + JITTER_Z_OFFSET,
        );
        (
            (fx + 0.5) * size + jx * JITTER_FRACTION * size,
            (fz + 0.5) * size + jz * JITTER_FRACTION * size,
        )
    }

    /// Outer ring radius of a cell; noise may only grow it.
    pub fn cell_radius(&self, cx: i64, cz: i64) -> f64 {
        let s = self.settings;
        let mut radius = s.base_radius;
        if s.radius_noise_scale > 0.0 {
            let n = self
                .noise
                .warp_x
                .noise2(cx as f64 * s.radius_noise_scale, cz as f64 * s.radius_noise_scale);
            radius *= 1.0 + s.radius_noise_amplitude * n;
            // NaN-safe: f64::max ignores a NaN operand.
            radius = radius.max(s.base_radius);
        }
        radius
    }

    /// Innermost tier of cell `(cx, cz)` containing `(x, z)`, if any.
    /// Tier 0 is the outer ring, `count - 1` the innermost.
    fn tier_in_cell(&self, cx: i64, cz: i64, x: f64, z: f64) -> Option<u32> {
        let s = self.settings;
        let (center_x, center_z) = self.cell_center(cx, cz);
        let dist = ((x - center_x).powi(2) + (z - center_z).powi(2)).sqrt();
        let radius = self.cell_radius(cx, cz);

        (0..s.count).rev().find(|&tier| {
            let ring = radius * s.radius_step.powi(tier as i32);
            let offset = cx as f64 * SHAPE_CELL_OFFSET + tier as f64 * SHAPE_TIER_OFFSET;
            let offset_z = cz as f64 * SHAPE_CELL_OFFSET + tier as f64 * SHAPE_TIER_OFFSET;
            let shape = 1.0
                + SHAPE_AMPLITUDE
                    * self
                        .noise
                        .warp_x
                        .noise2((x + offset) * SHAPE_FREQUENCY, (z + offset_z) * SHAPE_FREQUENCY);
            dist <= ring * shape
        })
    }

    /// Step factor in `(0, 1]`, or `None` when the point lies outside every
    /// plateau in its neighbourhood. Always `Some(1.0)` when disabled.
    pub fn step_factor(&self, x: f64, z: f64) -> Option<f64> {
        if !self.is_enabled() {
            return Some(1.0);
        }
        let count = self.settings.count;
        let (cx0, cz0) = self.cell_of(x, z);

        let mut best: u32 = 0;
        for dz in -1..=1 {
            for dx in -1..=1 {
                let (cx, cz) = (cx0.saturating_add(dx), cz0.saturating_add(dz));
                if let Some(tier) = self.tier_in_cell(cx, cz, x, z) {
                    best = best.max(tier + 1);
                    if best == count {
                        return Some(1.0);
                    }
                }
            }
        }

        if best == 0 {
            None
        } else {
            Some(best as f64 / count as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(count: u32, base_radius: f64) -> PlateauSettings {
        PlateauSettings {
            count,
            base_radius,
            radius_step: 0.6,
            radius_noise_scale: 0.0,
            radius_noise_amplitude: 0.0,
        }
    }

    #[test]
    fn disabled_field_never_rejects() {
        let noise = NoiseSet::new(1);
        let s = settings(0, 10.0);
        let field = PlateauStepField::new(&s, &noise);
        for i in 0..200 {
            assert_eq!(field.step_factor(i as f64 * 7.7, i as f64 * -3.1), Some(1.0));
        }
    }

    #[test]
    fn jittered_center_stays_in_its_cell() {
        let noise = NoiseSet::new(8);
        let s = settings(3, 10.0);
        let field = PlateauStepField::new(&s, &noise);
        for cx in -5..5 {
            for cz in -5..5 {
                let (x, z) = field.cell_center(cx, cz);
                assert_eq!(field.cell_of(x, z), (cx, cz));
            }
        }
    }

    #[test]
    fn cell_center_is_innermost_tier() {
        let noise = NoiseSet::new(0);
        let s = settings(3, 10.0);
        let field = PlateauStepField::new(&s, &noise);
        for (cx, cz) in [(0, 0), (3, -2), (-7, 11)] {
            let (x, z) = field.cell_center(cx, cz);
            assert_eq!(field.step_factor(x, z), Some(1.0));
        }
    }

    #[test]
    fn far_from_every_center_is_rejected() {
        let noise = NoiseSet::new(0);
        let s = PlateauSettings {
            radius_step: 0.5,
            ..settings(2, 10.0)
        };
        let field = PlateauStepField::new(&s, &noise);
        // Cell corners sit about 14 units from the nearest centers while the
        // outer ring averages 10, so most corners miss every plateau.
        let mut rejected = 0;
        for cx in -10..10 {
            for cz in -10..10 {
                let corner = (cx as f64 * 20.0, cz as f64 * 20.0);
                if field.step_factor(corner.0, corner.1).is_none() {
                    rejected += 1;
                }
            }
        }
        assert!(rejected > 0);
    }

    #[test]
    fn factors_are_tier_fractions() {
        let noise = NoiseSet::new(4);
        let s = settings(4, 16.0);
        let field = PlateauStepField::new(&s, &noise);
        for i in 0..400 {
            if let Some(f) = field.step_factor(i as f64 * 1.3, i as f64 * 0.7) {
                let tiers = f * 4.0;
                assert!((tiers - tiers.round()).abs() < 1e-12);
                assert!(f > 0.0 && f <= 1.0);
            }
        }
    }

    #[test]
    fn radius_noise_never_shrinks_below_base() {
        let noise = NoiseSet::new(2);
        let s = PlateauSettings {
            radius_noise_scale: 0.3,
            radius_noise_amplitude: 0.8,
            ..settings(3, 10.0)
        };
        let field = PlateauStepField::new(&s, &noise);
        for cx in -20..20 {
            let r = field.cell_radius(cx, cx * 3 + 1);
            assert!(r >= 10.0 && r <= 18.0);
        }
    }

    #[test]
    fn extreme_coordinates_do_not_overflow_cell_scan() {
        let noise = NoiseSet::new(6);
        let s = settings(3, 10.0);
        let field = PlateauStepField::new(&s, &noise);
        for v in [1e21, -1e21, f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            if let Some(f) = field.step_factor(v, v) {
                assert!(f > 0.0 && f <= 1.0);
            }
        }
        assert_eq!(field.step_factor(f64::INFINITY, 0.0), None);
        assert_eq!(field.cell_of(f64::INFINITY, f64::NEG_INFINITY), (i64::MAX, i64::MIN));
    }
}
