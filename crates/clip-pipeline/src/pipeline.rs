//! Per-file clipping pipeline.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clip_common::CrsCode;
use coverage::rasterize_coverage;
use tracing::{debug, info, warn};
use vector::{validate_and_repair, PolygonSet};

use crate::error::{PipelineError, PipelineResult};
use crate::mask::apply_mask;

/// Prefix prepended to each input file name to form the output name.
pub const OUTPUT_PREFIX: &str = "clip_";

/// Clips rasters to a polygon boundary.
///
/// The boundary is loaded once; reprojected copies are built on demand
/// per raster CRS and cached, so a batch of same-CRS rasters reprojects
/// at most once.
pub struct ClipPipeline {
    boundary: Arc<PolygonSet>,
    output_dir: PathBuf,
    // Most recent reprojection, keyed by target CRS
    aligned: Mutex<Option<(CrsCode, Arc<PolygonSet>)>>,
}

impl ClipPipeline {
    pub fn new(boundary: PolygonSet, output_dir: PathBuf) -> Self {
        Self {
            boundary: Arc::new(boundary),
            output_dir,
            aligned: Mutex::new(None),
        }
    }

    /// Clip a single raster file and write the result.
    ///
    /// On success returns the output path. Output file name is the input
    /// name with [`OUTPUT_PREFIX`] prepended; an existing file at that
    /// path is overwritten.
    pub fn process_file(&self, input: &Path) -> PipelineResult<PathBuf> {
        let layer = ascii_grid::read_raster(input).map_err(PipelineError::RasterRead)?;
        debug!(
            input = %input.display(),
            ncols = layer.geometry().ncols,
            nrows = layer.geometry().nrows,
            crs = %layer.geometry().crs,
            "loaded raster"
        );

        let boundary = self.aligned_for(layer.geometry().crs)?;

        let bounds = boundary.bounding_box().ok_or(PipelineError::NoOverlap)?;
        let window = layer
            .geometry()
            .snap_out(&bounds)
            .ok_or(PipelineError::NoOverlap)?;
        let cropped = layer.crop(&window)?;
        debug!(input = %input.display(), window = %window, "cropped to boundary extent");

        let fractions = rasterize_coverage(cropped.geometry(), boundary.polygons());
        let masked = apply_mask(&cropped, &fractions)?;

        let output = self.output_path(input);
        ascii_grid::write_raster(&masked, &output).map_err(PipelineError::Write)?;
        info!(
            input = %input.display(),
            output = %output.display(),
            kept = masked.valid_count(),
            cells = masked.geometry().len(),
            "wrote clipped raster"
        );
        Ok(output)
    }

    /// The boundary reprojected into `crs`, validated after reprojection.
    fn aligned_for(&self, crs: CrsCode) -> PipelineResult<Arc<PolygonSet>> {
        if crs == self.boundary.crs() {
            return Ok(Arc::clone(&self.boundary));
        }

        {
            let cache = self.aligned.lock().unwrap_or_else(|e| e.into_inner());
            if let Some((cached_crs, set)) = cache.as_ref() {
                if *cached_crs == crs {
                    return Ok(Arc::clone(set));
                }
            }
        }

        debug!(from = %self.boundary.crs(), to = %crs, "reprojecting boundary");
        let reprojected =
            projection::reproject_multipolygon(&self.boundary.to_multipolygon(), self.boundary.crs(), crs)?;
        let mut set = PolygonSet::from_multipolygon(reprojected, crs);

        // Reprojection can distort a valid ring into an invalid one
        let report = validate_and_repair(&mut set);
        if !report.is_clean() {
            return Err(PipelineError::InvalidAfterReprojection(report.unrepaired));
        }
        if !report.is_pristine() {
            warn!(
                repaired = report.repaired.len(),
                "repaired boundary features after reprojection"
            );
        }

        let set = Arc::new(set);
        let mut cache = self.aligned.lock().unwrap_or_else(|e| e.into_inner());
        *cache = Some((crs, Arc::clone(&set)));
        Ok(set)
    }

    fn output_path(&self, input: &Path) -> PathBuf {
        let base = input.file_name().unwrap_or_else(|| OsStr::new("raster.asc"));
        let mut name = OsString::from(OUTPUT_PREFIX);
        name.push(base);
        self.output_dir.join(name)
    }
}
