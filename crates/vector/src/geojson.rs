//! GeoJSON decoding for polygon layers.
//!
//! Accepts FeatureCollection, Feature, bare Polygon/MultiPolygon, and
//! GeometryCollection documents. The CRS comes from the legacy `crs`
//! member when present; RFC 7946 documents default to EPSG:4326.

use std::fs;
use std::path::Path;

use clip_common::CrsCode;
use geo_types::{Coord, LineString, Polygon};
use serde::Deserialize;

use crate::error::{VectorError, VectorResult};
use crate::polygon::PolygonSet;

type Position = Vec<f64>;
type Ring = Vec<Position>;
type PolyCoords = Vec<Ring>;

#[derive(Debug, Deserialize)]
struct CrsMember {
    properties: Option<CrsProperties>,
}

#[derive(Debug, Deserialize)]
struct CrsProperties {
    name: String,
}

#[derive(Debug, Deserialize)]
struct FeatureObject {
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: PolyCoords },
    MultiPolygon { coordinates: Vec<PolyCoords> },
    GeometryCollection { geometries: Vec<Geometry> },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Document {
    FeatureCollection {
        features: Vec<FeatureObject>,
        crs: Option<CrsMember>,
    },
    Feature {
        geometry: Option<Geometry>,
        crs: Option<CrsMember>,
    },
    Polygon {
        coordinates: PolyCoords,
        crs: Option<CrsMember>,
    },
    MultiPolygon {
        coordinates: Vec<PolyCoords>,
        crs: Option<CrsMember>,
    },
    GeometryCollection {
        geometries: Vec<Geometry>,
        crs: Option<CrsMember>,
    },
}

/// Read and decode a GeoJSON polygon layer from disk.
pub fn read_polygons(path: &Path) -> VectorResult<PolygonSet> {
    let text = fs::read_to_string(path)?;
    parse_geojson(&text)
}

/// Decode a GeoJSON document into a polygon set.
pub fn parse_geojson(text: &str) -> VectorResult<PolygonSet> {
    let document: Document = serde_json::from_str(text)?;

    let (crs_member, geometries): (Option<CrsMember>, Vec<Geometry>) = match document {
        Document::FeatureCollection { features, crs } => (
            crs,
            features.into_iter().filter_map(|f| f.geometry).collect(),
        ),
        Document::Feature { geometry, crs } => (crs, geometry.into_iter().collect()),
        Document::Polygon { coordinates, crs } => (crs, vec![Geometry::Polygon { coordinates }]),
        Document::MultiPolygon { coordinates, crs } => {
            (crs, vec![Geometry::MultiPolygon { coordinates }])
        }
        Document::GeometryCollection { geometries, crs } => (crs, geometries),
    };

    let crs = match crs_member.and_then(|m| m.properties) {
        Some(props) => CrsCode::parse(&props.name)?,
        None => CrsCode::Epsg4326,
    };

    let mut polygons = Vec::new();
    for geometry in geometries {
        collect_polygons(geometry, &mut polygons)?;
    }

    if polygons.is_empty() {
        return Err(VectorError::Empty);
    }

    Ok(PolygonSet::new(polygons, crs))
}

fn collect_polygons(geometry: Geometry, out: &mut Vec<Polygon<f64>>) -> VectorResult<()> {
    match geometry {
        Geometry::Polygon { coordinates } => {
            out.push(polygon_from_coords(coordinates)?);
        }
        Geometry::MultiPolygon { coordinates } => {
            for coords in coordinates {
                out.push(polygon_from_coords(coords)?);
            }
        }
        Geometry::GeometryCollection { geometries } => {
            for inner in geometries {
                collect_polygons(inner, out)?;
            }
        }
        Geometry::Unsupported => {
            return Err(VectorError::UnsupportedGeometry(
                "only Polygon and MultiPolygon features are supported".to_string(),
            ));
        }
    }
    Ok(())
}

fn polygon_from_coords(coords: PolyCoords) -> VectorResult<Polygon<f64>> {
    let mut rings = coords.into_iter().map(ring_to_linestring);
    let exterior = rings
        .next()
        .transpose()?
        .ok_or(VectorError::ShortRing(0))?;
    let interiors = rings.collect::<VectorResult<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn ring_to_linestring(ring: Ring) -> VectorResult<LineString<f64>> {
    if ring.len() < 4 {
        return Err(VectorError::ShortRing(ring.len()));
    }
    let coords = ring
        .into_iter()
        .map(|position| {
            if position.len() < 2 {
                return Err(VectorError::ShortPosition(position.len()));
            }
            // Elevation and further ordinates are dropped
            Ok(Coord {
                x: position[0],
                y: position[1],
            })
        })
        .collect::<VectorResult<Vec<_>>>()?;
    Ok(LineString::new(coords))
}
