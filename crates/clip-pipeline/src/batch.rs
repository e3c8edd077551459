//! Batch execution over many raster files.

use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{error, warn};

use crate::error::PipelineResult;
use crate::pipeline::ClipPipeline;

/// One input file that could not be clipped.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub cause: String,
}

/// Outcome counts for a batch run.
///
/// A failed file never aborts the batch; it is recorded here and the
/// remaining files still run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<FileFailure>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Clip every input file, isolating per-file failures.
///
/// With `jobs <= 1` files run sequentially in input order. With more
/// jobs a rayon pool of that size runs them in parallel; results are
/// still aggregated in input order, so the summary is deterministic.
pub fn run_batch(pipeline: &ClipPipeline, inputs: &[PathBuf], jobs: usize) -> BatchSummary {
    let results: Vec<PipelineResult<PathBuf>> = if jobs > 1 {
        match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
            Ok(pool) => pool.install(|| {
                inputs
                    .par_iter()
                    .map(|path| pipeline.process_file(path))
                    .collect()
            }),
            Err(err) => {
                warn!(%err, "failed to build thread pool, running sequentially");
                inputs.iter().map(|p| pipeline.process_file(p)).collect()
            }
        }
    } else {
        inputs.iter().map(|p| pipeline.process_file(p)).collect()
    };

    let mut summary = BatchSummary::default();
    for (path, result) in inputs.iter().zip(results) {
        match result {
            Ok(_) => summary.succeeded += 1,
            Err(err) => {
                error!(input = %path.display(), %err, "failed to clip raster");
                summary.failed += 1;
                summary.failures.push(FileFailure {
                    path: path.clone(),
                    cause: err.to_string(),
                });
            }
        }
    }
    summary
}
