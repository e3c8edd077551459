//! Full pipeline runs against on-disk fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use clip_common::{CrsCode, ValueType};
use clip_pipeline::{run_batch, ClipPipeline, PipelineError};
use vector::parse_geojson;

const GRID_4X4: &str = "\
ncols 4
nrows 4
xllcorner 0.0
yllcorner 0.0
cellsize 1.0
NODATA_value -9999
1 2 3 4
5 6 7 8
9 10 11 12
13 14 15 16
";

// Two unit squares touching at (1, 1): one at the origin, one
// diagonally above it
const BOUNDARY_STAIRS: &str = r#"{
    "type": "MultiPolygon",
    "coordinates": [
        [[[0,0],[1,0],[1,1],[0,1],[0,0]]],
        [[[1,1],[2,1],[2,2],[1,2],[1,1]]]
    ]
}"#;

fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn stairs_pipeline(output_dir: &Path) -> ClipPipeline {
    let boundary = parse_geojson(BOUNDARY_STAIRS).unwrap();
    ClipPipeline::new(boundary, output_dir.to_path_buf())
}

// ---- single file ------------------------------------------------------

#[test]
fn test_clip_crops_and_masks() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "input.asc", GRID_4X4);
    let pipeline = stairs_pipeline(dir.path());

    let output = pipeline.process_file(&input).unwrap();
    assert_eq!(output, dir.path().join("clip_input.asc"));

    let clipped = ascii_grid::read_raster(&output).unwrap();
    // Boundary bounds are (0,0)-(2,2): snapped window is the 2x2
    // south-west corner of the source grid
    assert_eq!(clipped.geometry().ncols, 2);
    assert_eq!(clipped.geometry().nrows, 2);
    assert_eq!(clipped.geometry().west, 0.0);
    assert_eq!(clipped.geometry().north, 2.0);
    assert_eq!(clipped.value_type(), ValueType::Int32);

    // Only the two cells under the squares keep their values
    assert_eq!(clipped.get(0, 0), None);
    assert_eq!(clipped.get(0, 1), Some(10.0));
    assert_eq!(clipped.get(1, 0), Some(13.0));
    assert_eq!(clipped.get(1, 1), None);
}

#[test]
fn test_output_overwrites_previous_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "input.asc", GRID_4X4);
    let pipeline = stairs_pipeline(dir.path());

    let first = pipeline.process_file(&input).unwrap();
    let second = pipeline.process_file(&input).unwrap();
    assert_eq!(first, second);
    assert_eq!(ascii_grid::read_raster(&second).unwrap().valid_count(), 2);
}

#[test]
fn test_disjoint_boundary_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "input.asc", GRID_4X4);

    let boundary = parse_geojson(
        r#"{"type": "Polygon", "coordinates": [[[100,100],[101,100],[101,101],[100,101],[100,100]]]}"#,
    )
    .unwrap();
    let pipeline = ClipPipeline::new(boundary, dir.path().to_path_buf());

    assert!(matches!(
        pipeline.process_file(&input),
        Err(PipelineError::NoOverlap)
    ));
    assert!(!dir.path().join("clip_input.asc").exists());
}

// ---- CRS alignment ----------------------------------------------------

#[test]
fn test_boundary_reprojected_to_raster_crs() {
    let dir = tempfile::tempdir().unwrap();
    // 2x2 web mercator raster covering 200km x 200km from the origin
    let input = write_fixture(
        dir.path(),
        "mercator.asc",
        "\
ncols 2
nrows 2
xllcorner 0.0
yllcorner 0.0
cellsize 100000.0
NODATA_value -9999
1.5 2.5
3.5 4.5
",
    );
    write_fixture(dir.path(), "mercator.prj", "EPSG:3857");

    // One-degree square in lon/lat, reprojects to roughly 111km a side
    let boundary = parse_geojson(
        r#"{"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]]}"#,
    )
    .unwrap();
    assert_eq!(boundary.crs(), CrsCode::Epsg4326);

    let pipeline = ClipPipeline::new(boundary, dir.path().to_path_buf());
    let output = pipeline.process_file(&input).unwrap();

    let clipped = ascii_grid::read_raster(&output).unwrap();
    assert_eq!(clipped.geometry().crs, CrsCode::Epsg3857);
    // The reprojected square clips into all four cells
    assert_eq!(clipped.valid_count(), 4);
    assert_eq!(clipped.value_type(), ValueType::Float64);
}

// ---- batch ------------------------------------------------------------

#[test]
fn test_batch_isolates_failures() {
    let dir = tempfile::tempdir().unwrap();
    let good_a = write_fixture(dir.path(), "a.asc", GRID_4X4);
    let bad = write_fixture(dir.path(), "b.asc", "not a raster at all\n");
    let good_c = write_fixture(dir.path(), "c.asc", GRID_4X4);

    let pipeline = stairs_pipeline(dir.path());
    let summary = run_batch(&pipeline, &[good_a, bad.clone(), good_c], 1);

    assert_eq!(summary.total(), 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert!(summary.has_failures());
    assert_eq!(summary.failures[0].path, bad);

    assert!(dir.path().join("clip_a.asc").exists());
    assert!(!dir.path().join("clip_b.asc").exists());
    assert!(dir.path().join("clip_c.asc").exists());
}

#[test]
fn test_parallel_batch_matches_sequential() {
    let dir = tempfile::tempdir().unwrap();
    let inputs: Vec<PathBuf> = (0..6)
        .map(|i| write_fixture(dir.path(), &format!("tile_{i}.asc"), GRID_4X4))
        .collect();

    let pipeline = stairs_pipeline(dir.path());
    let summary = run_batch(&pipeline, &inputs, 4);

    assert_eq!(summary.succeeded, 6);
    assert_eq!(summary.failed, 0);
    for i in 0..6 {
        let clipped = ascii_grid::read_raster(&dir.path().join(format!("clip_tile_{i}.asc"))).unwrap();
        assert_eq!(clipped.valid_count(), 2);
    }
}
