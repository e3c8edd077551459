//! Point and polygon reprojection between supported CRS pairs.

use clip_common::CrsCode;
use geo::MapCoords;
use geo_types::{Coord, MultiPolygon};
use thiserror::Error;

use crate::mercator;

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("unsupported CRS transformation: {from} -> {to}")]
    Unsupported { from: CrsCode, to: CrsCode },
}

/// Reproject a single coordinate from one CRS to another.
///
/// NAD83 (EPSG:4269) and WGS84 (EPSG:4326) are treated as
/// coordinate-identical; the datum offset is far below raster cell scale
/// for the data this pipeline targets.
pub fn reproject_coord(
    from: CrsCode,
    to: CrsCode,
    coord: Coord<f64>,
) -> Result<Coord<f64>, ProjectionError> {
    if from == to {
        return Ok(coord);
    }

    match (from.is_geographic(), to.is_geographic()) {
        // NAD83 <-> WGS84
        (true, true) => Ok(coord),
        // Geographic -> Web Mercator
        (true, false) => {
            let (x, y) = mercator::forward(coord.x, coord.y);
            Ok(Coord { x, y })
        }
        // Web Mercator -> geographic
        (false, true) => {
            let (x, y) = mercator::inverse(coord.x, coord.y);
            Ok(Coord { x, y })
        }
        (false, false) => Err(ProjectionError::Unsupported { from, to }),
    }
}

/// Reproject every coordinate of a multipolygon.
///
/// The pair is validated once up front; the per-coordinate mapping is then
/// infallible.
pub fn reproject_multipolygon(
    geometry: &MultiPolygon<f64>,
    from: CrsCode,
    to: CrsCode,
) -> Result<MultiPolygon<f64>, ProjectionError> {
    // Probe the pair before walking the geometry
    reproject_coord(from, to, Coord { x: 0.0, y: 0.0 })?;

    Ok(geometry.map_coords(|c| {
        // Pair already validated; identity fallback is unreachable
        reproject_coord(from, to, c).unwrap_or(c)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{polygon, Polygon};

    fn square() -> Polygon<f64> {
        polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
            (x: 0.0, y: 0.0),
        ]
    }

    #[test]
    fn test_identity_when_equal() {
        let c = Coord { x: 12.5, y: -3.25 };
        let out = reproject_coord(CrsCode::Epsg3857, CrsCode::Epsg3857, c).unwrap();
        assert_eq!(out, c);
    }

    #[test]
    fn test_nad83_wgs84_identity() {
        let c = Coord { x: -94.5, y: 39.0 };
        let out = reproject_coord(CrsCode::Epsg4269, CrsCode::Epsg4326, c).unwrap();
        assert_eq!(out, c);
    }

    #[test]
    fn test_geographic_to_mercator_and_back() {
        let mp = MultiPolygon::new(vec![square()]);
        let projected =
            reproject_multipolygon(&mp, CrsCode::Epsg4326, CrsCode::Epsg3857).unwrap();
        let back =
            reproject_multipolygon(&projected, CrsCode::Epsg3857, CrsCode::Epsg4326).unwrap();

        let orig: Vec<_> = mp.0[0].exterior().coords().copied().collect();
        let round: Vec<_> = back.0[0].exterior().coords().copied().collect();
        assert_eq!(orig.len(), round.len());
        for (a, b) in orig.iter().zip(round.iter()) {
            assert!((a.x - b.x).abs() < 1e-9);
            assert!((a.y - b.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_mercator_degrees_scale() {
        // One degree of longitude at the equator is ~111319.49 m
        let out = reproject_coord(
            CrsCode::Epsg4326,
            CrsCode::Epsg3857,
            Coord { x: 1.0, y: 0.0 },
        )
        .unwrap();
        assert!((out.x - 111319.490793).abs() < 1e-3);
        assert!(out.y.abs() < 1e-9);
    }
}
