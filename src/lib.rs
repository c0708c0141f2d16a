pub mod config;
pub mod error;
pub mod grid;
pub mod landforms;
pub mod logging;
pub mod noise;
pub mod octaves;
pub mod output;
pub mod plateau;
pub mod preview;
pub mod remap;
pub mod render;
pub mod rng;
pub mod sampler;
pub mod warp;

use std::sync::atomic::AtomicBool;
use std::time::Instant;

use config::{LandformParams, RenderConfig, View};
use error::Result;
use grid::Grid;
use noise::NoiseSet;
use sampler::HeightSampler;

pub use sampler::sample;

/// A sampled and rendered landform preview.
pub struct Preview {
    pub w: usize,
    pub h: usize,
    pub view: View,
    /// Heightmap: sampled height per pixel. Cross-section: the height that
    /// filled each solid pixel.
    pub heights: Grid<Option<f64>>,
    /// 8-bit grayscale, row-major.
    pub pixels: Vec<u8>,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Sample and render one landform. The noise sources are built once here and
/// shared by every row.
pub fn generate(
    params: &LandformParams,
    config: &RenderConfig,
    cancel: Option<&AtomicBool>,
) -> Result<(Preview, Vec<Timing>)> {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    let noise = NoiseSet::new(config.seed);
    let sampler = HeightSampler::new(params, &noise);

    // 1. Sample
    let t = Instant::now();
    let heights = match config.view {
        View::Heightmap => preview::sample_heightmap(&sampler, config, cancel)?,
        View::CrossSection => preview::sample_cross_section(&sampler, config, cancel)?,
    };
    timings.push(Timing {
        name: "sample",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Render
    let t = Instant::now();
    let pixels = match config.view {
        View::Heightmap => render::render_heightmap(&heights, params),
        View::CrossSection => render::render_cross_section(&heights),
    };
    timings.push(Timing {
        name: "render",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    let preview = Preview {
        w: heights.w,
        h: heights.h,
        view: config.view,
        heights,
        pixels,
    };

    Ok((preview, timings))
}
