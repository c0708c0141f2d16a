use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info};

use landform_preview::config::{LandformParams, RenderConfig, View};
use landform_preview::{landforms, logging, output};

/// Render landform parameter sets to grayscale previews.
#[derive(Parser, Debug)]
#[command(name = "landform-preview", about = "Preview procedural landforms as PNG images")]
struct Args {
    /// Landform file: worldgen config, JSON patch, or a list of landforms.
    #[arg(long, default_value = "landforms.json")]
    patch_file: PathBuf,

    /// Directory the PNGs are written to.
    #[arg(long, default_value = "noise_samples")]
    out_dir: PathBuf,

    /// Image width and height in pixels.
    #[arg(long, default_value_t = 256)]
    size: usize,

    /// World seed.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    seed: i32,

    /// Pixels per world unit.
    #[arg(long, default_value_t = 1.0)]
    zoom: f64,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    origin_x: f64,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    origin_z: f64,

    #[arg(long, value_enum, default_value_t = View::Heightmap)]
    view: View,

    /// World z of the cross-section slice.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    slice_z: f64,

    /// Only render the landform with this code.
    #[arg(long)]
    code: Option<String>,

    /// Inline landform JSON; replaces the patch file.
    #[arg(long)]
    definition: Option<String>,

    /// Log filter (error, warn, info, debug, trace). RUST_LOG takes precedence.
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            size: self.size,
            seed: self.seed,
            zoom: self.zoom,
            origin_x: self.origin_x,
            origin_z: self.origin_z,
            view: self.view,
            slice_z: self.slice_z,
        }
    }
}

fn run(args: &Args) -> landform_preview::error::Result<()> {
    let config = args.render_config();
    config.validate()?;

    let defs = match &args.definition {
        Some(json) => landforms::parse_definition(json)?,
        None => landforms::load_patch_file(&args.patch_file)?,
    };
    let defs = landforms::filter_by_code(defs, args.code.as_deref())?;

    output::prepare_output_dir(&args.out_dir)?;

    info!(
        count = defs.len(),
        size = config.size,
        seed = config.seed,
        view = ?config.view,
        "rendering landforms"
    );

    for def in defs {
        let params = LandformParams::from(def);
        let (preview, timings) = landform_preview::generate(&params, &config, None)?;

        for t in &timings {
            debug!(code = %params.code, stage = t.name, ms = t.ms, "timing");
        }

        let path = args
            .out_dir
            .join(format!("{}.png", output::sanitize_file_name(&params.code)));
        output::save_png(&path, &preview.pixels, preview.w, preview.h)?;
        info!(code = %params.code, path = %path.display(), "saved");
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_logging(args.log_level.as_deref());

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
