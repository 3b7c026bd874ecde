use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while building a paint-by-numbers template.
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected before any processing starts.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Two grids that must share a shape do not.
    #[error("shape mismatch: expected {expected_width}x{expected_height}, got {width}x{height}")]
    ShapeMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },

    /// A flat buffer is too short or too long for the grid it should fill.
    #[error("buffer of {found} elements does not fill a {width}x{height} grid (expected {expected})")]
    LengthMismatch {
        width: usize,
        height: usize,
        expected: usize,
        found: usize,
    },

    /// A grid value has no palette entry.
    #[error("label {label} has no palette entry (palette has {palette_len} colors)")]
    UnresolvedLabel { label: usize, palette_len: usize },

    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("failed to load font from {path}: {reason}")]
    Font { path: PathBuf, reason: String },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
