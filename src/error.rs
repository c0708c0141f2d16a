//! Error types for loading landforms and producing previews.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The landform file could not be read.
    #[error("failed to read landform file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The landform JSON is malformed.
    #[error("failed to parse landform JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Parsed fine but contained nothing that looks like a landform.
    #[error("no landform definitions found in {0}")]
    NoLandforms(String),

    #[error("no landform with code {0:?}")]
    UnknownCode(String),

    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid render settings: {0}")]
    InvalidRender(String),

    #[error("generation cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, Error>;
