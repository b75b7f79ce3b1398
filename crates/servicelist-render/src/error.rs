//! Error types for the render crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while preparing drawable resources.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A pixmap file could not be opened or decoded.
    #[error("failed to load pixmap {path}: {source}")]
    PixmapLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A pixmap was requested with zero width or height.
    #[error("invalid pixmap dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Raw pixel data did not match the declared dimensions.
    #[error("invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
