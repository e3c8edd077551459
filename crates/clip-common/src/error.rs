//! Error types for the shared raster-clip types.

use thiserror::Error;

/// Result type alias using ClipError.
pub type ClipResult<T> = Result<T, ClipError>;

/// Errors raised while constructing or manipulating grids and rasters.
#[derive(Debug, Error)]
pub enum ClipError {
    #[error("invalid grid geometry: {0}")]
    InvalidGrid(String),

    #[error("cell data length {actual} does not match grid size {expected}")]
    CellCountMismatch { expected: usize, actual: usize },

    #[error("window {window} exceeds grid dimensions {cols}x{rows}")]
    WindowOutOfBounds {
        window: String,
        cols: usize,
        rows: usize,
    },
}
