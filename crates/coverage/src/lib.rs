//! Per-cell polygon coverage rasterization.
//!
//! For every grid cell, computes the fraction of the cell's area covered
//! by a polygon set. Overlapping polygons are unioned first so shared
//! area is never counted twice; per-cell areas come from exact clipping
//! of rings against the cell rectangle.

mod clip;

use clip::clipped_ring_area;
use clip_common::{BoundingBox, GridGeometry};
use geo::BooleanOps;
use geo::BoundingRect;
use geo_types::{MultiPolygon, Polygon};

/// Coverage fractions for a grid, stored row-major from the north-west cell.
#[derive(Debug, Clone)]
pub struct CoverageFraction {
    geometry: GridGeometry,
    values: Vec<f64>,
}

impl CoverageFraction {
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Fraction of cell `(row, col)` covered, in `[0, 1]`.
    pub fn fraction(&self, row: usize, col: usize) -> f64 {
        self.values[self.geometry.index(row, col)]
    }
}

/// Rasterize a polygon set onto `grid` as per-cell coverage fractions.
///
/// Polygons are unioned before rasterization, so a cell covered by two
/// overlapping polygons reports the same fraction as if it were covered
/// by their union. Holes subtract from coverage. Every value lies in
/// `[0, 1]`.
pub fn rasterize_coverage(grid: &GridGeometry, polygons: &[Polygon<f64>]) -> CoverageFraction {
    let mut values = vec![0.0; grid.len()];

    let union = union_all(polygons);
    let cell_area = grid.cell_area();

    for polygon in &union.0 {
        let Some(rect) = polygon.bounding_rect() else {
            continue;
        };
        let bounds = BoundingBox::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y);
        let Some(window) = grid.snap_out(&bounds) else {
            continue;
        };

        for row in window.row_off..window.row_off + window.nrows {
            for col in window.col_off..window.col_off + window.ncols {
                let cell = grid.cell_bbox(row, col);
                let mut area = clipped_ring_area(polygon.exterior(), &cell);
                if area == 0.0 {
                    continue;
                }
                for hole in polygon.interiors() {
                    area -= clipped_ring_area(hole, &cell);
                }
                values[grid.index(row, col)] += area / cell_area;
            }
        }
    }

    // Union components are disjoint, so per-cell sums are exact up to
    // floating-point noise at shared boundaries.
    for value in &mut values {
        *value = value.clamp(0.0, 1.0);
    }

    CoverageFraction {
        geometry: grid.clone(),
        values,
    }
}

/// Union a polygon set into disjoint components.
///
/// A single polygon is passed through untouched so its coverage stays
/// exact; boolean ops only run when overlap is actually possible.
fn union_all(polygons: &[Polygon<f64>]) -> MultiPolygon<f64> {
    match polygons {
        [] => MultiPolygon(Vec::new()),
        [single] => MultiPolygon(vec![single.clone()]),
        [first, rest @ ..] => {
            let mut acc = MultiPolygon(vec![first.clone()]);
            for polygon in rest {
                acc = acc.union(&MultiPolygon(vec![polygon.clone()]));
            }
            acc
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clip_common::CrsCode;
    use geo_types::{line_string, polygon};

    fn grid_4x4() -> GridGeometry {
        // 4x4 unit cells, west=0, north=4
        GridGeometry::new(4, 4, 0.0, 4.0, 1.0, 1.0, CrsCode::Epsg4326).unwrap()
    }

    #[test]
    fn test_empty_polygon_set() {
        let coverage = rasterize_coverage(&grid_4x4(), &[]);
        assert!(coverage.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_full_cell_coverage() {
        // Covers cell (row 3, col 0): x in [0,1], y in [0,1]
        let p = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ];
        let coverage = rasterize_coverage(&grid_4x4(), &[p]);
        assert_eq!(coverage.fraction(3, 0), 1.0);
        assert_eq!(coverage.fraction(3, 1), 0.0);
        assert_eq!(coverage.fraction(2, 0), 0.0);
    }

    #[test]
    fn test_half_cell_axis_split() {
        // Left half of cell (3, 0)
        let p = polygon![
            (x: 0.0, y: 0.0),
            (x: 0.5, y: 0.0),
            (x: 0.5, y: 1.0),
            (x: 0.0, y: 1.0),
        ];
        let coverage = rasterize_coverage(&grid_4x4(), &[p]);
        assert!((coverage.fraction(3, 0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_hole_subtracts() {
        // Whole cell with a centered hole of area 0.25
        let p = Polygon::new(
            geo_types::line_string![
                (x: 0.0, y: 0.0),
                (x: 1.0, y: 0.0),
                (x: 1.0, y: 1.0),
                (x: 0.0, y: 1.0),
                (x: 0.0, y: 0.0),
            ],
            vec![geo_types::line_string![
                (x: 0.25, y: 0.25),
                (x: 0.75, y: 0.25),
                (x: 0.75, y: 0.75),
                (x: 0.25, y: 0.75),
                (x: 0.25, y: 0.25),
            ]],
        );
        let coverage = rasterize_coverage(&grid_4x4(), &[p]);
        assert!((coverage.fraction(3, 0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_overlapping_polygons_not_double_counted() {
        let a = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ];
        let b = a.clone();
        let coverage = rasterize_coverage(&grid_4x4(), &[a, b]);
        assert!((coverage.fraction(3, 0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_values_clamped() {
        let p = polygon![
            (x: -10.0, y: -10.0),
            (x: 10.0, y: -10.0),
            (x: 10.0, y: 10.0),
            (x: -10.0, y: 10.0),
        ];
        let coverage = rasterize_coverage(&grid_4x4(), &[p]);
        for &v in coverage.values() {
            assert!((0.0..=1.0).contains(&v));
            assert_eq!(v, 1.0);
        }
    }
}
