//! ESRI ASCII grid (.asc) decoding and encoding.
//!
//! Supports the standard header keywords (`ncols`, `nrows`,
//! `xllcorner`/`yllcorner` or `xllcenter`/`yllcenter`, `cellsize`,
//! `nodata_value`) plus the `dx`/`dy` pair for non-square cells. Data is
//! row-major with the first line being the northernmost row, matching the
//! top-down grid convention of [`clip_common::GridGeometry`].
//!
//! The CRS comes from a `.prj` sidecar next to the file (leniently scanned
//! for an EPSG code or a well-known name); files without a sidecar default
//! to EPSG:4326.

pub mod error;
mod header;

pub use error::{AscError, AscResult};
pub use header::Header;

use std::fs;
use std::path::{Path, PathBuf};

use clip_common::{CrsCode, GridGeometry, RasterLayer, ValueType};

/// Sentinel written for nodata when the input declared none.
pub const DEFAULT_NODATA: f64 = -9999.0;

/// Read a raster layer from an `.asc` file, including its `.prj` sidecar.
pub fn read_raster(path: &Path) -> AscResult<RasterLayer> {
    let text = fs::read_to_string(path)?;
    let crs = match read_crs_sidecar(path)? {
        Some(crs) => crs,
        None => CrsCode::Epsg4326,
    };
    parse_raster(&text, crs)
}

/// Write a raster layer as an `.asc` file, overwriting any existing file,
/// and emit the `.prj` sidecar for its CRS.
pub fn write_raster(layer: &RasterLayer, path: &Path) -> AscResult<()> {
    fs::write(path, format_raster(layer))?;
    fs::write(sidecar_path(path), format!("{}\n", layer.geometry().crs))?;
    Ok(())
}

/// Decode an ASCII grid document with a known CRS.
pub fn parse_raster(text: &str, crs: CrsCode) -> AscResult<RasterLayer> {
    let (header, data_tokens) = header::parse(text)?;

    let geometry = GridGeometry::new(
        header.ncols,
        header.nrows,
        header.west,
        header.south + header.nrows as f64 * header.dy,
        header.dx,
        header.dy,
        crs,
    )?;

    let expected = header.ncols * header.nrows;
    if data_tokens.len() != expected {
        return Err(AscError::CellCountMismatch {
            expected,
            found: data_tokens.len(),
        });
    }

    let mut value_type = ValueType::Int32;
    let mut values = Vec::with_capacity(expected);
    for (index, token) in data_tokens.iter().enumerate() {
        let parsed: f64 = token.parse().map_err(|_| AscError::InvalidToken {
            token: (*token).to_string(),
            index,
        })?;
        if !is_integer_token(token) {
            value_type = ValueType::Float64;
        }
        if parsed == header.nodata_value {
            values.push(None);
        } else {
            values.push(Some(parsed));
        }
    }

    Ok(RasterLayer::new(
        geometry,
        value_type,
        header.nodata_value,
        values,
    )?)
}

/// Encode a raster layer as an ASCII grid document.
pub fn format_raster(layer: &RasterLayer) -> String {
    let geometry = layer.geometry();
    let south = geometry.north - geometry.nrows as f64 * geometry.dy;

    let mut out = String::new();
    out.push_str(&format!("ncols         {}\n", geometry.ncols));
    out.push_str(&format!("nrows         {}\n", geometry.nrows));
    out.push_str(&format!("xllcorner     {}\n", fmt_f64(geometry.west)));
    out.push_str(&format!("yllcorner     {}\n", fmt_f64(south)));
    if geometry.dx == geometry.dy {
        out.push_str(&format!("cellsize      {}\n", fmt_f64(geometry.dx)));
    } else {
        out.push_str(&format!("dx            {}\n", fmt_f64(geometry.dx)));
        out.push_str(&format!("dy            {}\n", fmt_f64(geometry.dy)));
    }
    out.push_str(&format!(
        "NODATA_value  {}\n",
        fmt_value(layer.nodata_value(), layer.value_type())
    ));

    for row in 0..geometry.nrows {
        let mut line = String::new();
        for col in 0..geometry.ncols {
            if col > 0 {
                line.push(' ');
            }
            let value = layer.get(row, col).unwrap_or(layer.nodata_value());
            line.push_str(&fmt_value(value, layer.value_type()));
        }
        line.push('\n');
        out.push_str(&line);
    }
    out
}

/// Read the `.prj` sidecar for a raster path, if one exists.
pub fn read_crs_sidecar(path: &Path) -> AscResult<Option<CrsCode>> {
    let sidecar = sidecar_path(path);
    if !sidecar.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(&sidecar)?;
    parse_prj(&text).map(Some)
}

/// Leniently extract a CRS from `.prj` sidecar content.
///
/// Accepts a bare identifier ("EPSG:3857") or WKT, scanned for an EPSG
/// authority code or a well-known datum/projection name.
pub fn parse_prj(text: &str) -> AscResult<CrsCode> {
    if let Ok(crs) = CrsCode::parse(text) {
        return Ok(crs);
    }

    let upper = text.to_uppercase();
    let known = [
        ("3857", CrsCode::Epsg3857),
        ("900913", CrsCode::Epsg3857),
        ("PSEUDO-MERCATOR", CrsCode::Epsg3857),
        ("WEB_MERCATOR", CrsCode::Epsg3857),
        ("4269", CrsCode::Epsg4269),
        ("NAD83", CrsCode::Epsg4269),
        ("NAD_1983", CrsCode::Epsg4269),
        ("4326", CrsCode::Epsg4326),
        ("WGS84", CrsCode::Epsg4326),
        ("WGS_1984", CrsCode::Epsg4326),
    ];
    for (needle, crs) in known {
        if upper.contains(needle) {
            return Ok(crs);
        }
    }
    Err(AscError::UnknownCrs(text.trim().to_string()))
}

fn sidecar_path(path: &Path) -> PathBuf {
    path.with_extension("prj")
}

fn is_integer_token(token: &str) -> bool {
    !token.contains(['.', 'e', 'E']) && token.parse::<i32>().is_ok()
}

fn fmt_value(value: f64, value_type: ValueType) -> String {
    match value_type {
        ValueType::Int32 => format!("{}", value as i64),
        ValueType::Float64 => fmt_f64(value),
    }
}

/// Format a float so it round-trips and stays visibly floating point.
fn fmt_f64(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
