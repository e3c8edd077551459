//! Batch raster clipping service.
//!
//! Clips every raster in a directory to a GeoJSON polygon boundary:
//! crops to the boundary extent, masks cells outside the boundary to
//! nodata, and writes each result as `clip_<input name>`.

mod config;

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use clip_pipeline::{run_batch, ClipPipeline};
use config::ClipperConfig;

#[derive(Parser, Debug)]
#[command(name = "clipper")]
#[command(about = "Clip rasters to a polygon boundary")]
struct Args {
    /// Directory containing input rasters
    #[arg(long)]
    input_dir: PathBuf,

    /// GeoJSON polygon boundary file
    #[arg(long)]
    vector: PathBuf,

    /// Directory for clipped outputs
    #[arg(long)]
    output_dir: PathBuf,

    /// Input raster file extension
    #[arg(long, default_value = "asc")]
    extension: String,

    /// Worker threads (1 = sequential)
    #[arg(long, default_value_t = 1)]
    jobs: usize,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = ClipperConfig {
        input_dir: args.input_dir,
        vector_path: args.vector,
        output_dir: args.output_dir,
        extension: args.extension,
        jobs: args.jobs,
    };
    config.validate()?;

    info!(
        input_dir = %config.input_dir.display(),
        vector = %config.vector_path.display(),
        output_dir = %config.output_dir.display(),
        jobs = config.jobs,
        "Starting raster clipper"
    );

    let mut boundary = vector::read_polygons(&config.vector_path)
        .with_context(|| format!("failed to read boundary {}", config.vector_path.display()))?;
    let feature_count = boundary.len();
    let report = vector::validate_and_repair(&mut boundary);
    if report.repaired.is_empty() && report.unrepaired.len() == feature_count {
        bail!(
            "boundary file {} has no valid polygons and none could be repaired",
            config.vector_path.display()
        );
    }
    if !report.repaired.is_empty() {
        warn!(features = ?report.repaired, "repaired invalid boundary features");
    }
    if !report.unrepaired.is_empty() {
        warn!(
            features = ?report.unrepaired,
            "boundary features remain invalid, coverage may be wrong for them"
        );
    }
    if boundary.is_empty() {
        bail!("boundary file contains no polygons");
    }
    info!(features = boundary.len(), crs = %boundary.crs(), "Loaded boundary");

    let inputs = config.collect_inputs()?;
    if inputs.is_empty() {
        bail!(
            "no .{} rasters found in {}",
            config.extension.trim_start_matches('.'),
            config.input_dir.display()
        );
    }

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let pipeline = ClipPipeline::new(boundary, config.output_dir.clone());
    let summary = run_batch(&pipeline, &inputs, config.jobs);

    info!(
        total = summary.total(),
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Batch complete"
    );
    // Per-file failures are reported but do not fail the run
    for failure in &summary.failures {
        warn!(input = %failure.path.display(), cause = %failure.cause, "skipped");
    }

    Ok(())
}
