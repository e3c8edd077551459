//! Error types for vector layer decoding.

use clip_common::CrsParseError;
use thiserror::Error;

/// Result type alias using VectorError.
pub type VectorResult<T> = Result<T, VectorError>;

#[derive(Debug, Error)]
pub enum VectorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CRS member: {0}")]
    Crs(#[from] CrsParseError),

    #[error("unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    #[error("ring has {0} positions, at least 4 required")]
    ShortRing(usize),

    #[error("position has {0} ordinates, at least 2 required")]
    ShortPosition(usize),

    #[error("no polygon features found in vector layer")]
    Empty,
}
