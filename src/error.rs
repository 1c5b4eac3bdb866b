use std::path::PathBuf;

use thiserror::Error;

use crate::font::FontError;

#[derive(Debug, Error)]
pub enum CardError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid portfolio JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid portfolio: {0}")]
    Invalid(String),

    #[error("card dimensions must be positive, got {width}x{height}")]
    Layout { width: u32, height: u32 },

    #[error(transparent)]
    Font(#[from] FontError),

    /// The composed scene was rejected by the SVG parser.
    #[cfg(feature = "png")]
    #[error("failed to parse card scene: {0}")]
    Scene(#[from] usvg::Error),

    #[error("failed to allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },

    #[error("failed to encode PNG: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, CardError>;
