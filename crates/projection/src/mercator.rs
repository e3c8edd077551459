//! Spherical Web Mercator projection (EPSG:3857).
//!
//! Forward maps geographic lon/lat degrees to projected meters on a sphere
//! of radius 6378137 m; inverse maps back. Latitude is clamped to the Web
//! Mercator valid range (about ±85.05°) so the forward transform is total.

use std::f64::consts::PI;

/// WGS84 semi-major axis, used as the sphere radius (meters).
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Maximum latitude representable in Web Mercator (degrees).
///
/// atan(sinh(π)) — the latitude where the projection becomes square.
pub const MAX_LATITUDE: f64 = 85.05112877980659;

/// Extent of the projection in meters from the origin (half the world width).
pub const MAX_EXTENT: f64 = PI * EARTH_RADIUS;

/// Project geographic coordinates (degrees) to Web Mercator meters.
pub fn forward(lon_deg: f64, lat_deg: f64) -> (f64, f64) {
    let to_rad = PI / 180.0;
    let lat = lat_deg.clamp(-MAX_LATITUDE, MAX_LATITUDE) * to_rad;
    let lon = lon_deg * to_rad;

    let x = EARTH_RADIUS * lon;
    let y = EARTH_RADIUS * (PI / 4.0 + lat / 2.0).tan().ln();
    (x, y)
}

/// Unproject Web Mercator meters back to geographic coordinates (degrees).
pub fn inverse(x: f64, y: f64) -> (f64, f64) {
    let to_deg = 180.0 / PI;
    let lon = (x / EARTH_RADIUS) * to_deg;
    let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0) * to_deg;
    (lon, lat)
}
