//! Disk round-trip tests: write a layer, read it back, compare.

use ascii_grid::{read_raster, write_raster};
use clip_common::{CrsCode, GridGeometry, RasterLayer, ValueType};

fn sample_layer(crs: CrsCode) -> RasterLayer {
    let geometry = GridGeometry::new(3, 2, 100.0, 52.0, 0.25, 0.25, crs).unwrap();
    let values = vec![
        Some(1.0),
        Some(2.0),
        None,
        Some(-4.0),
        Some(5.0),
        Some(6.0),
    ];
    RasterLayer::new(geometry, ValueType::Int32, -9999.0, values).unwrap()
}

#[test]
fn test_write_then_read_preserves_layer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.asc");

    let layer = sample_layer(CrsCode::Epsg4326);
    write_raster(&layer, &path).unwrap();

    // Sidecar is emitted alongside the grid
    assert!(dir.path().join("sample.prj").exists());

    let reread = read_raster(&path).unwrap();
    assert_eq!(reread.geometry(), layer.geometry());
    assert_eq!(reread.value_type(), ValueType::Int32);
    assert_eq!(reread.values(), layer.values());
}

#[test]
fn test_sidecar_carries_projected_crs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mercator.asc");

    let layer = sample_layer(CrsCode::Epsg3857);
    write_raster(&layer, &path).unwrap();

    let reread = read_raster(&path).unwrap();
    assert_eq!(reread.geometry().crs, CrsCode::Epsg3857);
}

#[test]
fn test_missing_sidecar_defaults_to_wgs84() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bare.asc");

    std::fs::write(
        &path,
        "ncols 1\nnrows 1\nxllcorner 0\nyllcorner 0\ncellsize 1\n7\n",
    )
    .unwrap();

    let layer = read_raster(&path).unwrap();
    assert_eq!(layer.geometry().crs, CrsCode::Epsg4326);
    assert_eq!(layer.get(0, 0), Some(7.0));
}

#[test]
fn test_overwrite_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.asc");

    write_raster(&sample_layer(CrsCode::Epsg4326), &path).unwrap();
    let mut second = sample_layer(CrsCode::Epsg4326);
    second.set(0, 0, Some(42.0));
    write_raster(&second, &path).unwrap();

    let reread = read_raster(&path).unwrap();
    assert_eq!(reread.get(0, 0), Some(42.0));
}
