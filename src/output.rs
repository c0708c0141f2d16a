//! Writing previews: file names, directories and PNG encoding.

use std::path::Path;

use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;

use crate::error::{Error, Result};

/// Turn a landform code into a safe file stem. Keeps ASCII alphanumerics,
/// `-`, `_` and `.`; everything else becomes `_`. Leading dots are dropped.
pub fn sanitize_file_name(code: &str) -> String {
    let cleaned: String = code
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "landform".to_string()
    } else {
        cleaned.to_string()
    }
}

pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Save 8-bit grayscale pixels as a PNG.
pub fn save_png(path: &Path, pixels: &[u8], w: usize, h: usize) -> Result<()> {
    let (w, h) = image_dims(w, h)?;
    image::save_buffer(path, pixels, w, h, image::ColorType::L8)?;
    Ok(())
}

pub fn encode_png(pixels: &[u8], w: usize, h: usize) -> Result<Vec<u8>> {
    let (w, h) = image_dims(w, h)?;
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(pixels, w, h, image::ExtendedColorType::L8)?;
    Ok(buf)
}

fn image_dims(w: usize, h: usize) -> Result<(u32, u32)> {
    match (u32::try_from(w), u32::try_from(h)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(Error::InvalidRender(format!("image {w}x{h} is too large to encode"))),
    }
}

pub fn encode_png_data_url(pixels: &[u8], w: usize, h: usize) -> Result<String> {
    let png = encode_png(pixels, w, h)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&png);
    Ok(format!("data:image/png;base64,{}", b64))
}
