use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_NOISE_SCALE: f64 = 0.001;
pub const DEFAULT_RADIUS_STEP: f64 = 0.6;

/// Which value drives the vertical remap lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemapMode {
    /// Query with the clamped octave total (heightmap semantics).
    #[default]
    Total,
    /// Query with the normalized vertical position of the sample.
    Vertical,
}

/// A landform exactly as it appears in a parameter file. Every field is
/// optional on the wire; unknown keys (`hexcolor`, `comment`, `weight`,
/// `mutations`, ...) are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LandformDef {
    pub code: Option<String>,
    pub noise_scale: f64,
    pub terrain_octaves: Vec<f64>,
    pub terrain_octave_thresholds: Vec<f64>,
    pub terrain_y_key_positions: Vec<f64>,
    pub terrain_y_key_thresholds: Vec<f64>,
    pub base_height: f64,
    pub height_offset: f64,
    pub threshold: f64,
    /// Number of tiers. Fractional values are truncated.
    pub plateau_count: f64,
    pub base_radius: f64,
    pub radius_step: f64,
    pub radius_noise_scale: f64,
    pub radius_noise_amplitude: f64,
    pub remap_mode: RemapMode,
}

impl Default for LandformDef {
    fn default() -> Self {
        Self {
            code: None,
            noise_scale: DEFAULT_NOISE_SCALE,
            terrain_octaves: Vec::new(),
            terrain_octave_thresholds: Vec::new(),
            terrain_y_key_positions: Vec::new(),
            terrain_y_key_thresholds: Vec::new(),
            base_height: 0.0,
            height_offset: 1.0,
            threshold: 0.0,
            plateau_count: 0.0,
            base_radius: 0.0,
            radius_step: DEFAULT_RADIUS_STEP,
            radius_noise_scale: 0.0,
            radius_noise_amplitude: 0.0,
            remap_mode: RemapMode::Total,
        }
    }
}

/// One fractal layer: amplitude plus its rejection floor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Octave {
    pub amplitude: f64,
    pub threshold: f64,
}

/// One control point of the vertical remap table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RemapKey {
    pub position: f64,
    pub threshold: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlateauSettings {
    /// 0 when the feature is disabled.
    pub count: u32,
    pub base_radius: f64,
    pub radius_step: f64,
    pub radius_noise_scale: f64,
    pub radius_noise_amplitude: f64,
}

impl PlateauSettings {
    pub fn is_enabled(&self) -> bool {
        self.count > 0 && self.base_radius > 0.0
    }
}

/// Normalized, immutable landform parameters. Index-aligned sequences are
/// zipped here once so sampling never pads or bounds-checks.
#[derive(Clone, Debug, PartialEq)]
pub struct LandformParams {
    pub code: String,
    pub noise_scale: f64,
    pub base_height: f64,
    pub height_offset: f64,
    pub threshold: f64,
    pub remap_mode: RemapMode,
    pub plateau: PlateauSettings,
    octaves: Vec<Octave>,
    remap: Vec<RemapKey>,
}

impl LandformParams {
    pub fn octaves(&self) -> &[Octave] {
        &self.octaves
    }

    pub fn remap_keys(&self) -> &[RemapKey] {
        &self.remap
    }

    /// Map a sampled height back to its `[0, 1]` fraction of the height range.
    pub fn normalize(&self, height: f64) -> f64 {
        if self.height_offset == 0.0 {
            return 1.0;
        }
        crate::noise::clamp01((height - self.base_height) / self.height_offset)
    }
}

impl Default for LandformParams {
    fn default() -> Self {
        LandformDef::default().into()
    }
}

impl From<LandformDef> for LandformParams {
    fn from(def: LandformDef) -> Self {
        let code = def.code.unwrap_or_else(|| "landform".to_string());

        let amplitudes = if def.terrain_octaves.is_empty() {
            vec![1.0]
        } else {
            def.terrain_octaves
        };
        if def.terrain_octave_thresholds.len() < amplitudes.len() {
            debug!(
                code = %code,
                octaves = amplitudes.len(),
                thresholds = def.terrain_octave_thresholds.len(),
                "padding octave thresholds with zeros"
            );
        }
        let octaves = amplitudes
            .iter()
            .enumerate()
            .map(|(i, &amplitude)| Octave {
                amplitude,
                threshold: def.terrain_octave_thresholds.get(i).copied().unwrap_or(0.0),
            })
            .collect();

        let positions = &def.terrain_y_key_positions;
        let thresholds = &def.terrain_y_key_thresholds;
        if positions.len() != thresholds.len() {
            warn!(
                code = %code,
                positions = positions.len(),
                thresholds = thresholds.len(),
                "vertical remap sequences differ in length, truncating"
            );
        }
        let mut remap: Vec<RemapKey> = positions
            .iter()
            .zip(thresholds)
            .map(|(&position, &threshold)| RemapKey { position, threshold })
            .collect();
        let mut healed = false;
        for i in 1..remap.len() {
            if remap[i].position < remap[i - 1].position {
                remap[i].position = remap[i - 1].position;
                healed = true;
            }
        }
        if healed {
            warn!(code = %code, "vertical remap positions were not non-decreasing");
        }

        let radius_step = if def.radius_step > 0.0 && def.radius_step <= 1.0 {
            def.radius_step
        } else {
            if def.plateau_count >= 1.0 {
                warn!(
                    code = %code,
                    radius_step = def.radius_step,
                    "radiusStep out of range, using default"
                );
            }
            DEFAULT_RADIUS_STEP
        };
        let tiers = def.plateau_count.trunc();
        let enabled = tiers >= 1.0 && def.base_radius > 0.0;
        let plateau = PlateauSettings {
            count: if enabled {
                tiers.min(u32::MAX as f64) as u32
            } else {
                0
            },
            base_radius: if enabled { def.base_radius } else { 0.0 },
            radius_step,
            radius_noise_scale: def.radius_noise_scale,
            radius_noise_amplitude: def.radius_noise_amplitude,
        };

        Self {
            code,
            noise_scale: def.noise_scale,
            base_height: def.base_height,
            height_offset: def.height_offset,
            threshold: def.threshold,
            remap_mode: def.remap_mode,
            plateau,
            octaves,
            remap,
        }
    }
}

/// What a preview image shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    /// Top-down grayscale heightmap.
    #[default]
    Heightmap,
    /// Vertical silhouette along `z = slice_z`.
    CrossSection,
}

/// Preview settings shared by the CLI and the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    pub size: usize,
    pub seed: i32,
    /// Pixels per world unit.
    pub zoom: f64,
    pub origin_x: f64,
    pub origin_z: f64,
    pub view: View,
    pub slice_z: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: 256,
            seed: 0,
            zoom: 1.0,
            origin_x: 0.0,
            origin_z: 0.0,
            view: View::Heightmap,
            slice_z: 0.0,
        }
    }
}

/// Largest accepted preview edge in pixels.
pub const MAX_SIZE: usize = 8192;

impl RenderConfig {
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.size == 0 {
            return Err(crate::error::Error::InvalidRender("size must be positive".into()));
        }
        if self.size > MAX_SIZE {
            return Err(crate::error::Error::InvalidRender(format!(
                "size {} exceeds the maximum of {MAX_SIZE}",
                self.size
            )));
        }
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(crate::error::Error::InvalidRender(format!(
                "zoom must be a positive number, got {}",
                self.zoom
            )));
        }
        Ok(())
    }

    /// World coordinate of a pixel column/row.
    #[inline]
    pub fn world(&self, origin: f64, pixel: usize) -> f64 {
        origin + pixel as f64 / self.zoom
    }
}
