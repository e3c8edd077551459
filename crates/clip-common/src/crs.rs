//! Coordinate Reference System identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known CRS codes supported by the clipping pipeline.
///
/// Raster/vector CRS alignment compares these for exact equality; any
/// mismatch triggers a reprojection of the polygon set into the raster's
/// CRS before coverage is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsCode {
    /// WGS84 Geographic (lat/lon in degrees)
    Epsg4326,
    /// NAD83 Geographic
    Epsg4269,
    /// Web Mercator (meters)
    Epsg3857,
}

impl CrsCode {
    /// Parse a CRS identifier string.
    ///
    /// Accepts formats like:
    /// - "EPSG:4326"
    /// - "epsg:3857"
    /// - "urn:ogc:def:crs:EPSG::3857" (GeoJSON legacy crs member)
    /// - "CRS:84" / "urn:ogc:def:crs:OGC:1.3:CRS84" (lon/lat WGS84)
    pub fn parse(s: &str) -> Result<Self, CrsParseError> {
        let normalized = s.trim().to_uppercase();

        if normalized == "CRS:84" || normalized.ends_with("CRS84") {
            return Ok(CrsCode::Epsg4326);
        }

        let code = normalized
            .rsplit(':')
            .next()
            .and_then(|tail| tail.parse::<u32>().ok())
            .ok_or_else(|| CrsParseError::Unrecognized(s.to_string()))?;

        Self::from_epsg(code).ok_or(CrsParseError::UnsupportedCode(code))
    }

    /// Look up a CRS by bare EPSG code.
    pub fn from_epsg(code: u32) -> Option<Self> {
        match code {
            4326 => Some(CrsCode::Epsg4326),
            4269 => Some(CrsCode::Epsg4269),
            3857 => Some(CrsCode::Epsg3857),
            _ => None,
        }
    }

    /// The numeric EPSG code.
    pub fn epsg(&self) -> u32 {
        match self {
            CrsCode::Epsg4326 => 4326,
            CrsCode::Epsg4269 => 4269,
            CrsCode::Epsg3857 => 3857,
        }
    }

    /// Check if this is a geographic (lat/lon degrees) CRS.
    pub fn is_geographic(&self) -> bool {
        matches!(self, CrsCode::Epsg4326 | CrsCode::Epsg4269)
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CrsParseError {
    #[error("Unrecognized CRS identifier: {0}")]
    Unrecognized(String),

    #[error("Unsupported EPSG code: {0}")]
    UnsupportedCode(u32),
}
