//! Spherical (Web) Mercator projection, EPSG:3857.
//!
//! Treats WGS84 lon/lat as if on a sphere of radius `a`, which is what web
//! map tiles use. Latitudes beyond roughly ±85.05° map outside the square
//! world extent and the poles map to infinity.

use std::f64::consts::PI;

/// Web Mercator projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebMercator {
    /// Sphere radius (meters)
    pub radius: f64,
}

impl WebMercator {
    /// Half the width of the square world extent (meters).
    pub const MAX_EXTENT: f64 = 20_037_508.342_789_244;

    pub fn new() -> Self {
        Self {
            radius: 6_378_137.0,
        }
    }

    /// Geographic (lon, lat in degrees) to projected (x, y in meters).
    pub fn forward(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        let x = self.radius * lon_deg.to_radians();
        let y = self.radius * (PI / 4.0 + lat_deg.to_radians() / 2.0).tan().ln();
        (x, y)
    }

    /// Projected (x, y in meters) to geographic (lon, lat in degrees).
    pub fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let lon = x / self.radius;
        let lat = 2.0 * (y / self.radius).exp().atan() - PI / 2.0;
        (lon.to_degrees(), lat.to_degrees())
    }
}

impl Default for WebMercator {
    fn default() -> Self {
        Self::new()
    }
}
