//! Binary masking of a raster against coverage fractions.

use clip_common::{ClipError, ClipResult, RasterLayer};
use coverage::CoverageFraction;

/// Coverage threshold for keeping a cell. Any genuine touch counts; the
/// epsilon only absorbs floating-point noise from the area computation.
pub const COVERAGE_EPSILON: f64 = 1e-9;

/// Set every cell whose coverage fraction does not exceed
/// [`COVERAGE_EPSILON`] to nodata. Cells that were already nodata stay
/// nodata regardless of coverage.
pub fn apply_mask(layer: &RasterLayer, coverage: &CoverageFraction) -> ClipResult<RasterLayer> {
    if !layer.geometry().same_shape(coverage.geometry()) {
        return Err(ClipError::CellCountMismatch {
            expected: layer.geometry().len(),
            actual: coverage.geometry().len(),
        });
    }

    let values = layer
        .values()
        .iter()
        .zip(coverage.values())
        .map(|(&value, &fraction)| {
            if fraction > COVERAGE_EPSILON {
                value
            } else {
                None
            }
        })
        .collect();

    RasterLayer::new(
        layer.geometry().clone(),
        layer.value_type(),
        layer.nodata_value(),
        values,
    )
}
