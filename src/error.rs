use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a [`crate::SketchConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while exporting the canvas
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export size must be greater than zero")]
    InvalidSize,
    #[error("export of {width}x{height} pixels is too large")]
    TooLarge { width: u32, height: u32 },
    #[error("canvas has no area ({width}x{height})")]
    EmptyCanvas { width: f32, height: f32 },
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write export to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
