//! In-memory raster layers with explicit per-cell nodata.

use crate::error::{ClipError, ClipResult};
use crate::grid::{CellWindow, GridGeometry};
use serde::{Deserialize, Serialize};

/// On-disk numeric representation of raster cell values.
///
/// Preserved from input to output: an integer raster is written back as
/// integers, a floating point raster as floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    Int32,
    Float64,
}

/// A raster grid with one optional numeric value per cell.
///
/// Nodata is modeled as `None` rather than as an in-band sentinel; the
/// on-disk sentinel (`nodata_value`) is only applied when the layer is
/// written out.
#[derive(Debug, Clone)]
pub struct RasterLayer {
    geometry: GridGeometry,
    value_type: ValueType,
    nodata_value: f64,
    values: Vec<Option<f64>>,
}

impl RasterLayer {
    /// Create a layer from cell values in row-major order (row 0 = north).
    pub fn new(
        geometry: GridGeometry,
        value_type: ValueType,
        nodata_value: f64,
        values: Vec<Option<f64>>,
    ) -> ClipResult<Self> {
        if values.len() != geometry.len() {
            return Err(ClipError::CellCountMismatch {
                expected: geometry.len(),
                actual: values.len(),
            });
        }
        Ok(Self {
            geometry,
            value_type,
            nodata_value,
            values,
        })
    }

    /// Create a layer with every cell set to nodata.
    pub fn filled_nodata(geometry: GridGeometry, value_type: ValueType, nodata_value: f64) -> Self {
        let values = vec![None; geometry.len()];
        Self {
            geometry,
            value_type,
            nodata_value,
            values,
        }
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// The sentinel used for nodata cells when the layer is persisted.
    pub fn nodata_value(&self) -> f64 {
        self.nodata_value
    }

    /// Cell value at (row, col); `None` for nodata.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values[self.geometry.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: Option<f64>) {
        let idx = self.geometry.index(row, col);
        self.values[idx] = value;
    }

    /// All cell values in row-major order.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Number of cells holding a value (not nodata).
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Extract a sub-window as a new layer with the same cell size and
    /// phase (no resampling).
    pub fn crop(&self, window: &CellWindow) -> ClipResult<RasterLayer> {
        if window.col_off + window.ncols > self.geometry.ncols
            || window.row_off + window.nrows > self.geometry.nrows
        {
            return Err(ClipError::WindowOutOfBounds {
                window: window.to_string(),
                cols: self.geometry.ncols,
                rows: self.geometry.nrows,
            });
        }

        let mut values = Vec::with_capacity(window.len());
        for row in window.row_off..window.row_off + window.nrows {
            let start = self.geometry.index(row, window.col_off);
            values.extend_from_slice(&self.values[start..start + window.ncols]);
        }

        Ok(RasterLayer {
            geometry: self.geometry.window_geometry(window),
            value_type: self.value_type,
            nodata_value: self.nodata_value,
            values,
        })
    }
}
