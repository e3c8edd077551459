//! Coordinate reference system transformations.
//!
//! Implements the supported map projections from scratch without external
//! projection dependencies.

pub mod mercator;
pub mod transform;

pub use transform::{reproject_coord, reproject_multipolygon, ProjectionError};
