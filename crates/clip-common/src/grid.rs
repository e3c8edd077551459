//! Regular grid geometry with half-open cell semantics.

use crate::error::{ClipError, ClipResult};
use crate::{BoundingBox, CrsCode};
use serde::{Deserialize, Serialize};

/// Geometry of an axis-aligned raster grid.
///
/// Rows run top-down: row 0 is the northernmost row. Cell `(row, col)`
/// occupies the half-open region
/// `x ∈ [west + col*dx, west + (col+1)*dx)` and, measured downward from
/// the north edge, `offset ∈ [row*dy, (row+1)*dy)`. A point exactly on a
/// shared cell boundary therefore belongs to exactly one cell.
///
/// Invariant: `dx > 0` and `dy > 0` (enforced by [`GridGeometry::new`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Number of columns
    pub ncols: usize,
    /// Number of rows
    pub nrows: usize,
    /// X coordinate of the west (left) edge
    pub west: f64,
    /// Y coordinate of the north (top) edge
    pub north: f64,
    /// Cell width in CRS units
    pub dx: f64,
    /// Cell height in CRS units
    pub dy: f64,
    /// Coordinate reference system of the grid
    pub crs: CrsCode,
}

impl GridGeometry {
    /// Create a new grid geometry, validating cell dimensions.
    pub fn new(
        ncols: usize,
        nrows: usize,
        west: f64,
        north: f64,
        dx: f64,
        dy: f64,
        crs: CrsCode,
    ) -> ClipResult<Self> {
        if !(dx > 0.0) || !dx.is_finite() {
            return Err(ClipError::InvalidGrid(format!(
                "cell width must be positive, got {dx}"
            )));
        }
        if !(dy > 0.0) || !dy.is_finite() {
            return Err(ClipError::InvalidGrid(format!(
                "cell height must be positive, got {dy}"
            )));
        }
        if !west.is_finite() || !north.is_finite() {
            return Err(ClipError::InvalidGrid(format!(
                "origin must be finite, got ({west}, {north})"
            )));
        }

        Ok(Self {
            ncols,
            nrows,
            west,
            north,
            dx,
            dy,
            crs,
        })
    }

    /// Bounding box of the full grid extent.
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox {
            min_x: self.west,
            min_y: self.north - self.nrows as f64 * self.dy,
            max_x: self.west + self.ncols as f64 * self.dx,
            max_y: self.north,
        }
    }

    /// Bounding box of a single cell.
    pub fn cell_bbox(&self, row: usize, col: usize) -> BoundingBox {
        let min_x = self.west + col as f64 * self.dx;
        let max_y = self.north - row as f64 * self.dy;
        BoundingBox {
            min_x,
            min_y: max_y - self.dy,
            max_x: min_x + self.dx,
            max_y,
        }
    }

    /// Area of one cell in squared CRS units.
    pub fn cell_area(&self) -> f64 {
        self.dx * self.dy
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.ncols * self.nrows
    }

    /// Check if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.ncols == 0 || self.nrows == 0
    }

    /// Flat row-major index for a cell.
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.ncols + col
    }

    /// Column owning `x` under the half-open convention, if inside the grid.
    pub fn col_at(&self, x: f64) -> Option<usize> {
        let d = (x - self.west) / self.dx;
        if d < 0.0 || d >= self.ncols as f64 {
            return None;
        }
        Some(d.floor() as usize)
    }

    /// Row owning `y` under the half-open convention, if inside the grid.
    ///
    /// The offset is measured downward from the north edge, so the north
    /// edge itself belongs to row 0 and the south edge is outside.
    pub fn row_at(&self, y: f64) -> Option<usize> {
        let d = (self.north - y) / self.dy;
        if d < 0.0 || d >= self.nrows as f64 {
            return None;
        }
        Some(d.floor() as usize)
    }

    /// Check if two grids have identical dimensions.
    pub fn same_shape(&self, other: &GridGeometry) -> bool {
        self.ncols == other.ncols && self.nrows == other.nrows
    }

    /// Smallest cell-aligned window fully containing `bounds`, clamped to
    /// the grid ("snap-out": partial boundary cells are included whole).
    ///
    /// Returns `None` when `bounds` has no positive-area overlap with the
    /// grid extent.
    pub fn snap_out(&self, bounds: &BoundingBox) -> Option<CellWindow> {
        if !bounds.intersects(&self.bbox()) {
            return None;
        }

        let col0 = ((bounds.min_x - self.west) / self.dx).floor().max(0.0) as usize;
        let col1 = ((bounds.max_x - self.west) / self.dx)
            .ceil()
            .min(self.ncols as f64) as usize;
        let row0 = ((self.north - bounds.max_y) / self.dy).floor().max(0.0) as usize;
        let row1 = ((self.north - bounds.min_y) / self.dy)
            .ceil()
            .min(self.nrows as f64) as usize;

        if col1 <= col0 || row1 <= row0 {
            return None;
        }

        Some(CellWindow {
            col_off: col0,
            row_off: row0,
            ncols: col1 - col0,
            nrows: row1 - row0,
        })
    }

    /// Geometry of a sub-window, sharing cell size and phase with this grid.
    pub fn window_geometry(&self, window: &CellWindow) -> GridGeometry {
        GridGeometry {
            ncols: window.ncols,
            nrows: window.nrows,
            west: self.west + window.col_off as f64 * self.dx,
            north: self.north - window.row_off as f64 * self.dy,
            dx: self.dx,
            dy: self.dy,
            crs: self.crs,
        }
    }
}

/// A rectangular sub-window of a grid, in cell indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellWindow {
    pub col_off: usize,
    pub row_off: usize,
    pub ncols: usize,
    pub nrows: usize,
}

impl CellWindow {
    /// Number of cells covered by the window.
    pub fn len(&self) -> usize {
        self.ncols * self.nrows
    }

    /// Check if the window covers no cells.
    pub fn is_empty(&self) -> bool {
        self.ncols == 0 || self.nrows == 0
    }
}

impl std::fmt::Display for CellWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{}+{}+{}",
            self.ncols, self.nrows, self.col_off, self.row_off
        )
    }
}
