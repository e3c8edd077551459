//! The shared polygon layer used for clipping.

use clip_common::{BoundingBox, CrsCode};
use geo::BoundingRect;
use geo_types::{MultiPolygon, Polygon};

/// An ordered collection of polygons sharing one CRS.
///
/// The set is read once per batch and shared read-only across all file
/// iterations; reprojected copies are per-iteration and owned by the
/// iteration that requested them.
#[derive(Debug, Clone)]
pub struct PolygonSet {
    pub(crate) polygons: Vec<Polygon<f64>>,
    pub(crate) crs: CrsCode,
}

impl PolygonSet {
    pub fn new(polygons: Vec<Polygon<f64>>, crs: CrsCode) -> Self {
        Self { polygons, crs }
    }

    /// Rebuild a set from a multipolygon (e.g. a reprojection result).
    pub fn from_multipolygon(geometry: MultiPolygon<f64>, crs: CrsCode) -> Self {
        Self {
            polygons: geometry.0,
            crs,
        }
    }

    pub fn crs(&self) -> CrsCode {
        self.crs
    }

    pub fn polygons(&self) -> &[Polygon<f64>] {
        &self.polygons
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Clone the geometry into a single multipolygon.
    pub fn to_multipolygon(&self) -> MultiPolygon<f64> {
        MultiPolygon::new(self.polygons.clone())
    }

    /// Bounding box over all features; `None` for an empty set.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut bbox: Option<BoundingBox> = None;
        for polygon in &self.polygons {
            let Some(rect) = polygon.bounding_rect() else {
                continue;
            };
            bbox = Some(match bbox {
                None => BoundingBox::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y),
                Some(b) => BoundingBox::new(
                    b.min_x.min(rect.min().x),
                    b.min_y.min(rect.min().y),
                    b.max_x.max(rect.max().x),
                    b.max_y.max(rect.max().y),
                ),
            });
        }
        bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::polygon;

    #[test]
    fn test_bounding_box_over_features() {
        let set = PolygonSet::new(
            vec![
                polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 1.0), (x: 0.0, y: 0.0)],
                polygon![(x: 5.0, y: 5.0), (x: 6.0, y: 5.0), (x: 6.0, y: 7.0), (x: 5.0, y: 5.0)],
            ],
            CrsCode::Epsg4326,
        );

        let bbox = set.bounding_box().unwrap();
        assert_eq!(bbox.min_x, 0.0);
        assert_eq!(bbox.min_y, 0.0);
        assert_eq!(bbox.max_x, 6.0);
        assert_eq!(bbox.max_y, 7.0);
    }

    #[test]
    fn test_empty_set_has_no_bbox() {
        let set = PolygonSet::new(Vec::new(), CrsCode::Epsg4326);
        assert!(set.is_empty());
        assert!(set.bounding_box().is_none());
    }
}
