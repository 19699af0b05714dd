//! Ellipsoidal Transverse Mercator projection (UTM, Gauss-Krüger).
//!
//! Uses the series expansions from Snyder, "Map Projections: A Working
//! Manual" (USGS PP 1395, pp. 60-64). Accuracy is at the millimeter level
//! within a few degrees of the central meridian, which covers the 6° UTM
//! zones.
//!
//! The projection parameters include:
//! - Central meridian (lon0) and latitude of origin (lat0)
//! - Scale factor on the central meridian (k0)
//! - False easting / northing (meters)
//! - Reference ellipsoid

use serde::{Deserialize, Serialize};

use crate::{Ellipsoid, ProjectionError};

/// Transverse Mercator projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransverseMercator {
    /// Central meridian (degrees)
    pub lon0: f64,
    /// Latitude of origin (degrees)
    #[serde(default)]
    pub lat0: f64,
    /// Scale factor on the central meridian
    pub k0: f64,
    /// False easting (meters)
    #[serde(default)]
    pub false_easting: f64,
    /// False northing (meters)
    #[serde(default)]
    pub false_northing: f64,
    /// Reference ellipsoid
    #[serde(default)]
    pub ellipsoid: Ellipsoid,
}

impl TransverseMercator {
    /// WGS84 UTM zone (1-60), northern or southern hemisphere.
    pub fn utm(zone: u32, south: bool) -> Result<Self, ProjectionError> {
        if !(1..=60).contains(&zone) {
            return Err(ProjectionError::InvalidZone(zone));
        }

        Ok(Self {
            lon0: zone as f64 * 6.0 - 183.0,
            lat0: 0.0,
            k0: 0.9996,
            false_easting: 500_000.0,
            false_northing: if south { 10_000_000.0 } else { 0.0 },
            ellipsoid: Ellipsoid::WGS84,
        })
    }

    /// Meridional arc length from the equator to `lat` (radians).
    fn meridian_arc(&self, lat: f64) -> f64 {
        let e2 = self.ellipsoid.e2();
        let e4 = e2 * e2;
        let e6 = e4 * e2;

        self.ellipsoid.a
            * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * lat
                - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * lat).sin()
                + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * lat).sin()
                - (35.0 * e6 / 3072.0) * (6.0 * lat).sin())
    }

    /// Geographic (lon, lat in degrees) to projected (easting, northing in meters).
    pub fn forward(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        let e2 = self.ellipsoid.e2();
        let ep2 = self.ellipsoid.ep2();
        let k0 = self.k0;

        let lat = lat_deg.to_radians();
        let dlon = normalize_lon(lon_deg - self.lon0).to_radians();

        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let tan_lat = lat.tan();

        let n = self.ellipsoid.a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let t = tan_lat * tan_lat;
        let c = ep2 * cos_lat * cos_lat;
        let a = dlon * cos_lat;
        let m = self.meridian_arc(lat);
        let m0 = self.meridian_arc(self.lat0.to_radians());

        let a2 = a * a;
        let a3 = a2 * a;
        let a4 = a3 * a;
        let a5 = a4 * a;
        let a6 = a5 * a;

        let x = k0
            * n
            * (a + (1.0 - t + c) * a3 / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a5 / 120.0);
        let y = k0
            * (m - m0
                + n * tan_lat
                    * (a2 / 2.0
                        + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                        + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a6 / 720.0));

        (x + self.false_easting, y + self.false_northing)
    }

    /// Projected (easting, northing in meters) to geographic (lon, lat in degrees).
    pub fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let a = self.ellipsoid.a;
        let e2 = self.ellipsoid.e2();
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        let ep2 = self.ellipsoid.ep2();
        let k0 = self.k0;

        let m = self.meridian_arc(self.lat0.to_radians()) + (y - self.false_northing) / k0;
        let mu = m / (a * (1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0));

        let sqrt_1_e2 = (1.0 - e2).sqrt();
        let e1 = (1.0 - sqrt_1_e2) / (1.0 + sqrt_1_e2);
        let e1_2 = e1 * e1;
        let e1_3 = e1_2 * e1;
        let e1_4 = e1_3 * e1;

        // Footpoint latitude
        let lat1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1_3 / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1_2 / 16.0 - 55.0 * e1_4 / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1_3 / 96.0) * (6.0 * mu).sin()
            + (1097.0 * e1_4 / 512.0) * (8.0 * mu).sin();

        let sin_lat1 = lat1.sin();
        let cos_lat1 = lat1.cos();
        let tan_lat1 = lat1.tan();

        let w = 1.0 - e2 * sin_lat1 * sin_lat1;
        let n1 = a / w.sqrt();
        let r1 = a * (1.0 - e2) / w.powf(1.5);
        let t1 = tan_lat1 * tan_lat1;
        let c1 = ep2 * cos_lat1 * cos_lat1;
        let d = (x - self.false_easting) / (n1 * k0);

        let d2 = d * d;
        let d3 = d2 * d;
        let d4 = d3 * d;
        let d5 = d4 * d;
        let d6 = d5 * d;

        let lat = lat1
            - (n1 * tan_lat1 / r1)
                * (d2 / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d4 / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * ep2
                        - 3.0 * c1 * c1)
                        * d6
                        / 720.0);
        let dlon = (d - (1.0 + 2.0 * t1 + c1) * d3 / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1) * d5
                / 120.0)
            / cos_lat1;

        (
            normalize_lon(self.lon0 + dlon.to_degrees()),
            lat.to_degrees(),
        )
    }
}

/// Wrap a longitude difference into [-180, 180].
///
/// Non-finite input comes back as NaN.
fn normalize_lon(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        return lon;
    }
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utm_zone_parameters() {
        let zone32 = TransverseMercator::utm(32, false).unwrap();
        assert_eq!(zone32.lon0, 9.0);
        assert_eq!(zone32.false_northing, 0.0);

        let zone1s = TransverseMercator::utm(1, true).unwrap();
        assert_eq!(zone1s.lon0, -177.0);
        assert_eq!(zone1s.false_northing, 10_000_000.0);

        assert_eq!(
            TransverseMercator::utm(0, false),
            Err(ProjectionError::InvalidZone(0))
        );
        assert!(TransverseMercator::utm(61, false).is_err());
    }

    #[test]
    fn test_central_meridian_on_equator() {
        let proj = TransverseMercator::utm(31, false).unwrap();
        let (x, y) = proj.forward(3.0, 0.0);
        assert!((x - 500_000.0).abs() < 1e-6);
        assert!(y.abs() < 1e-6);
    }

    #[test]
    fn test_known_point_zurich() {
        // Zurich main station, 47.3779°N 8.5403°E -> UTM 32N
        let proj = TransverseMercator::utm(32, false).unwrap();
        let (x, y) = proj.forward(8.5403, 47.3779);
        assert!((x - 465_298.26).abs() < 0.5, "easting {}", x);
        assert!((y - 5_247_262.60).abs() < 0.5, "northing {}", y);
    }

    #[test]
    fn test_roundtrip_inside_zone() {
        let proj = TransverseMercator::utm(32, false).unwrap();
        for (lon, lat) in [(9.0, 48.0), (11.5, 48.1), (6.2, 45.0), (10.9, 60.3)] {
            let (x, y) = proj.forward(lon, lat);
            let (lon2, lat2) = proj.inverse(x, y);
            assert!((lon - lon2).abs() < 1e-7, "lon {} vs {}", lon, lon2);
            assert!((lat - lat2).abs() < 1e-7, "lat {} vs {}", lat, lat2);
        }
    }

    #[test]
    fn test_southern_hemisphere_roundtrip() {
        let proj = TransverseMercator::utm(56, true).unwrap();
        let (x, y) = proj.forward(151.2, -33.9);
        assert!(y > 6_000_000.0 && y < 10_000_000.0);
        let (lon, lat) = proj.inverse(x, y);
        assert!((lon - 151.2).abs() < 1e-7);
        assert!((lat + 33.9).abs() < 1e-7);
    }

    #[test]
    fn test_normalize_lon() {
        assert_eq!(normalize_lon(180.0), 180.0);
        assert_eq!(normalize_lon(-180.0), -180.0);
        assert!((normalize_lon(190.0) + 170.0).abs() < 1e-9);
        assert!((normalize_lon(-540.0) + 180.0).abs() < 1e-9);
        assert!((normalize_lon(725.0) - 5.0).abs() < 1e-9);

        let huge = normalize_lon(1e20);
        assert!((-180.0..=180.0).contains(&huge), "got {}", huge);
        assert!(normalize_lon(f64::INFINITY).is_nan());
        assert!(normalize_lon(f64::NAN).is_nan());
    }

    #[test]
    fn test_forward_with_huge_longitude_returns() {
        let proj = TransverseMercator::utm(32, false).unwrap();
        let (x, y) = proj.forward(1e20, 45.0);
        assert!(x.is_finite() && y.is_finite());
    }
}
