//! End-to-end raster clipping: load, align, crop, mask, write.
//!
//! [`ClipPipeline`] handles one raster at a time; [`run_batch`] drives a
//! whole directory of them, sequentially or on a rayon pool, with
//! per-file failure isolation.

pub mod batch;
pub mod error;
pub mod mask;
pub mod pipeline;

pub use batch::{run_batch, BatchSummary, FileFailure};
pub use error::{PipelineError, PipelineResult};
pub use mask::{apply_mask, COVERAGE_EPSILON};
pub use pipeline::{ClipPipeline, OUTPUT_PREFIX};
