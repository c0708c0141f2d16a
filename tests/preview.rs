//! Full preview pipeline: parameters → grid → pixels → PNG on disk.

use std::sync::atomic::AtomicBool;

use landform_preview::config::{
    LandformDef, LandformParams, MAX_SIZE, RemapMode, RenderConfig, View,
};
use landform_preview::error::Error;
use landform_preview::{generate, output};

fn mesa() -> LandformParams {
    LandformParams::from(LandformDef {
        code: Some("game:mesa/tall".into()),
        noise_scale: 0.01,
        terrain_octaves: vec![1.0, 0.5],
        plateau_count: 3.0,
        base_radius: 12.0,
        radius_step: 0.6,
        ..Default::default()
    })
}

fn config(view: View) -> RenderConfig {
    RenderConfig {
        size: 32,
        seed: 7,
        zoom: 0.5,
        view,
        ..Default::default()
    }
}

#[test]
fn heightmap_has_one_byte_per_pixel() {
    let (preview, timings) = generate(&mesa(), &config(View::Heightmap), None).unwrap();
    assert_eq!((preview.w, preview.h), (32, 32));
    assert_eq!(preview.pixels.len(), 32 * 32);
    assert_eq!(timings.last().map(|t| t.name), Some("TOTAL"));
    // Rejected samples render black, accepted ones by height.
    for (px, cell) in preview.pixels.iter().zip(&preview.heights.data) {
        if cell.is_none() {
            assert_eq!(*px, 0);
        }
    }
}

#[test]
fn generation_is_deterministic() {
    let a = generate(&mesa(), &config(View::Heightmap), None).unwrap().0;
    let b = generate(&mesa(), &config(View::Heightmap), None).unwrap().0;
    assert_eq!(a.pixels, b.pixels);
}

#[test]
fn vertical_mode_cross_section_renders() {
    let params = LandformParams::from(LandformDef {
        code: Some("cliffs".into()),
        terrain_y_key_positions: vec![0.0, 0.5, 1.0],
        terrain_y_key_thresholds: vec![1.0, 0.8, 0.0],
        remap_mode: RemapMode::Vertical,
        ..Default::default()
    });
    let (preview, _) = generate(&params, &config(View::CrossSection), None).unwrap();
    assert!(preview.pixels.iter().all(|&p| p == 0 || p == 255));
    // The bottom row (level 0) is solid wherever the column is not rejected.
    let bottom = &preview.pixels[31 * 32..];
    assert!(bottom.iter().any(|&p| p == 255));
}

#[test]
fn cancelled_generation_reports_cancel() {
    let cancel = AtomicBool::new(true);
    let result = generate(&mesa(), &config(View::Heightmap), Some(&cancel));
    assert!(matches!(result, Err(Error::Cancelled)));
}

#[test]
fn zero_size_is_rejected() {
    let bad = RenderConfig {
        size: 0,
        ..Default::default()
    };
    assert!(matches!(generate(&mesa(), &bad, None), Err(Error::InvalidRender(_))));
}

#[test]
fn oversized_preview_is_rejected_before_allocating() {
    let bad = RenderConfig {
        size: MAX_SIZE + 1,
        ..Default::default()
    };
    assert!(matches!(generate(&mesa(), &bad, None), Err(Error::InvalidRender(_))));
}

#[test]
fn writes_sanitized_png() {
    let params = mesa();
    let (preview, _) = generate(&params, &config(View::Heightmap), None).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("samples");
    output::prepare_output_dir(&out).unwrap();
    let path = out.join(format!("{}.png", output::sanitize_file_name(&params.code)));
    output::save_png(&path, &preview.pixels, preview.w, preview.h).unwrap();
    assert!(path.ends_with("game_mesa_tall.png"));
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..4], b"\x89PNG");
}
