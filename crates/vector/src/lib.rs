//! Polygon layer model: GeoJSON decoding, validity handling, and the
//! shared [`PolygonSet`] passed through the clipping pipeline.

pub mod error;
pub mod geojson;
pub mod polygon;
pub mod validity;

pub use error::{VectorError, VectorResult};
pub use geojson::{parse_geojson, read_polygons};
pub use polygon::PolygonSet;
pub use validity::{validate_and_repair, ValidityReport};
