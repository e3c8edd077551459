//! Error types for ASCII grid decoding and encoding.

use clip_common::ClipError;
use thiserror::Error;

/// Result type alias using AscError.
pub type AscResult<T> = Result<T, AscError>;

#[derive(Debug, Error)]
pub enum AscError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid header line: {0}")]
    InvalidHeader(String),

    #[error("missing header field: {0}")]
    MissingField(&'static str),

    #[error("invalid data token '{token}' at position {index}")]
    InvalidToken { token: String, index: usize },

    #[error("expected {expected} data values, found {found}")]
    CellCountMismatch { expected: usize, found: usize },

    #[error("unrecognized CRS in sidecar: {0}")]
    UnknownCrs(String),

    #[error(transparent)]
    Grid(#[from] ClipError),
}
