//! Common types shared across the raster-clip crates.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod grid;
pub mod raster;

pub use bbox::BoundingBox;
pub use crs::{CrsCode, CrsParseError};
pub use error::{ClipError, ClipResult};
pub use grid::{CellWindow, GridGeometry};
pub use raster::{RasterLayer, ValueType};
