//! Pipeline error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read raster: {0}")]
    RasterRead(ascii_grid::AscError),

    #[error("reprojection failed: {0}")]
    Reprojection(#[from] projection::ProjectionError),

    #[error("boundary invalid after reprojection, unrepaired features: {0:?}")]
    InvalidAfterReprojection(Vec<usize>),

    #[error("raster extent does not overlap the boundary")]
    NoOverlap,

    #[error("grid operation failed: {0}")]
    Grid(#[from] clip_common::ClipError),

    #[error("failed to write output: {0}")]
    Write(ascii_grid::AscError),
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
