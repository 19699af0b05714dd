//! Point transforms between coordinate reference systems.

use grid_common::CrsId;
use serde::{Deserialize, Serialize};

use crate::{ProjectionError, TransverseMercator, WebMercator};

/// A resolved coordinate reference system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Projection {
    /// Longitude/latitude in degrees (x = lon, y = lat).
    Geographic,
    /// Spherical Web Mercator in meters.
    WebMercator,
    /// Ellipsoidal Transverse Mercator in meters (UTM, Gauss-Krüger).
    TransverseMercator(TransverseMercator),
}

impl Projection {
    /// Projected coordinates to geographic (lon, lat in degrees).
    pub fn to_geographic(&self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Projection::Geographic => (x, y),
            Projection::WebMercator => WebMercator::new().inverse(x, y),
            Projection::TransverseMercator(tm) => tm.inverse(x, y),
        }
    }

    /// Geographic (lon, lat in degrees) to projected coordinates.
    pub fn from_geographic(&self, lon: f64, lat: f64) -> (f64, f64) {
        match self {
            Projection::Geographic => (lon, lat),
            Projection::WebMercator => WebMercator::new().forward(lon, lat),
            Projection::TransverseMercator(tm) => tm.forward(lon, lat),
        }
    }
}

/// A directional transform between two resolved systems.
///
/// Implementations are stateless per call; unknown systems are rejected when
/// the transform is built, so applying it cannot fail.
pub trait PointTransform: Send + Sync {
    fn pt(&self, x: f64, y: f64) -> (f64, f64);
}

/// Reprojection from one [`Projection`] to another through geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reproj {
    pub from: Projection,
    pub to: Projection,
}

impl Reproj {
    pub fn new(from: Projection, to: Projection) -> Self {
        Self { from, to }
    }
}

impl PointTransform for Reproj {
    fn pt(&self, x: f64, y: f64) -> (f64, f64) {
        if self.from == self.to {
            return (x, y);
        }
        let (lon, lat) = self.from.to_geographic(x, y);
        self.to.from_geographic(lon, lat)
    }
}

/// A reprojection engine that resolves CRS identifiers.
pub trait Reprojector: Send + Sync {
    /// Check that `crs` can be resolved.
    fn validate(&self, crs: &CrsId) -> Result<(), ProjectionError>;

    /// Build a transform from `from` to `to`.
    fn transformer(
        &self,
        from: &CrsId,
        to: &CrsId,
    ) -> Result<Box<dyn PointTransform>, ProjectionError>;

    /// Transform a single point.
    fn transform(
        &self,
        from: &CrsId,
        to: &CrsId,
        x: f64,
        y: f64,
    ) -> Result<(f64, f64), ProjectionError> {
        Ok(self.transformer(from, to)?.pt(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_projection_is_identity() {
        let reproj = Reproj::new(Projection::WebMercator, Projection::WebMercator);
        assert_eq!(reproj.pt(1234.5, -678.9), (1234.5, -678.9));
    }

    #[test]
    fn test_geographic_to_web_mercator() {
        let reproj = Reproj::new(Projection::Geographic, Projection::WebMercator);
        let (x, y) = reproj.pt(180.0, 0.0);
        assert!((x - WebMercator::MAX_EXTENT).abs() < 1e-6);
        assert!(y.abs() < 1e-6);
    }

    #[test]
    fn test_utm_to_web_mercator_and_back() {
        let utm = Projection::TransverseMercator(TransverseMercator::utm(32, false).unwrap());
        let there = Reproj::new(utm, Projection::WebMercator);
        let back = Reproj::new(Projection::WebMercator, utm);

        let (x, y) = there.pt(690_075.0, 5_330_060.0);
        let (x2, y2) = back.pt(x, y);
        assert!((x2 - 690_075.0).abs() < 1e-2);
        assert!((y2 - 5_330_060.0).abs() < 1e-2);
    }

    #[test]
    fn test_projection_deserializes_from_yaml() {
        let yaml = "type: transverse_mercator\nlon0: 12.0\nk0: 1.0\nfalse_easting: 4500000.0\n";
        let projection: Projection = serde_yaml::from_str(yaml).unwrap();
        match projection {
            Projection::TransverseMercator(tm) => {
                assert_eq!(tm.lon0, 12.0);
                assert_eq!(tm.lat0, 0.0);
                assert_eq!(tm.false_easting, 4_500_000.0);
            }
            other => panic!("unexpected projection {:?}", other),
        }
    }
}
