//! ASCII grid header parsing.

use crate::error::{AscError, AscResult};

/// Resolved header of an ASCII grid document.
///
/// Origin keywords are normalized to the lower-left *corner*; `xllcenter`
/// and `yllcenter` are converted using the cell size.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub ncols: usize,
    pub nrows: usize,
    /// X of the west edge
    pub west: f64,
    /// Y of the south edge
    pub south: f64,
    pub dx: f64,
    pub dy: f64,
    /// Declared sentinel, or [`crate::DEFAULT_NODATA`]
    pub nodata_value: f64,
}

#[derive(Debug, Default)]
struct RawHeader {
    ncols: Option<usize>,
    nrows: Option<usize>,
    xllcorner: Option<f64>,
    xllcenter: Option<f64>,
    yllcorner: Option<f64>,
    yllcenter: Option<f64>,
    cellsize: Option<f64>,
    dx: Option<f64>,
    dy: Option<f64>,
    nodata_value: Option<f64>,
}

/// Split a document into its resolved header and raw data tokens.
///
/// Header lines are `keyword value` pairs; the data section starts at the
/// first line whose leading token is numeric.
pub(crate) fn parse(text: &str) -> AscResult<(Header, Vec<&str>)> {
    let mut raw = RawHeader::default();
    let mut data_tokens = Vec::new();
    let mut in_data = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if !in_data {
            let first = trimmed.split_whitespace().next().unwrap_or("");
            if first
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            {
                parse_header_line(&mut raw, trimmed)?;
                continue;
            }
            in_data = true;
        }
        data_tokens.extend(trimmed.split_whitespace());
    }

    Ok((resolve(raw)?, data_tokens))
}

fn parse_header_line(raw: &mut RawHeader, line: &str) -> AscResult<()> {
    let mut parts = line.split_whitespace();
    let key = parts.next().unwrap_or("").to_ascii_lowercase();
    let value = parts
        .next()
        .ok_or_else(|| AscError::InvalidHeader(line.to_string()))?;
    if parts.next().is_some() {
        return Err(AscError::InvalidHeader(line.to_string()));
    }

    let number: f64 = value
        .parse()
        .map_err(|_| AscError::InvalidHeader(line.to_string()))?;

    match key.as_str() {
        "ncols" => raw.ncols = Some(parse_count(value, line)?),
        "nrows" => raw.nrows = Some(parse_count(value, line)?),
        "xllcorner" => raw.xllcorner = Some(number),
        "xllcenter" => raw.xllcenter = Some(number),
        "yllcorner" => raw.yllcorner = Some(number),
        "yllcenter" => raw.yllcenter = Some(number),
        "cellsize" => raw.cellsize = Some(number),
        "dx" => raw.dx = Some(number),
        "dy" => raw.dy = Some(number),
        "nodata_value" => raw.nodata_value = Some(number),
        _ => return Err(AscError::InvalidHeader(line.to_string())),
    }
    Ok(())
}

fn parse_count(value: &str, line: &str) -> AscResult<usize> {
    value
        .parse()
        .map_err(|_| AscError::InvalidHeader(line.to_string()))
}

fn resolve(raw: RawHeader) -> AscResult<Header> {
    let ncols = raw.ncols.ok_or(AscError::MissingField("ncols"))?;
    let nrows = raw.nrows.ok_or(AscError::MissingField("nrows"))?;

    let (dx, dy) = match (raw.cellsize, raw.dx, raw.dy) {
        (Some(size), None, None) => (size, size),
        (None, Some(dx), Some(dy)) => (dx, dy),
        (None, None, None) => return Err(AscError::MissingField("cellsize")),
        _ => {
            return Err(AscError::InvalidHeader(
                "cellsize and dx/dy are mutually exclusive".to_string(),
            ))
        }
    };

    let west = match (raw.xllcorner, raw.xllcenter) {
        (Some(corner), None) => corner,
        (None, Some(center)) => center - dx / 2.0,
        (None, None) => return Err(AscError::MissingField("xllcorner")),
        _ => {
            return Err(AscError::InvalidHeader(
                "xllcorner and xllcenter are mutually exclusive".to_string(),
            ))
        }
    };
    let south = match (raw.yllcorner, raw.yllcenter) {
        (Some(corner), None) => corner,
        (None, Some(center)) => center - dy / 2.0,
        (None, None) => return Err(AscError::MissingField("yllcorner")),
        _ => {
            return Err(AscError::InvalidHeader(
                "yllcorner and yllcenter are mutually exclusive".to_string(),
            ))
        }
    };

    Ok(Header {
        ncols,
        nrows,
        west,
        south,
        dx,
        dy,
        nodata_value: raw.nodata_value.unwrap_or(crate::DEFAULT_NODATA),
    })
}
