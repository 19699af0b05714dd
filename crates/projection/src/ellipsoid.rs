//! Reference ellipsoids.

use serde::{Deserialize, Serialize};

/// Reference ellipsoid given by semi-major axis and flattening.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    /// Semi-major axis (meters)
    pub a: f64,
    /// Flattening
    pub f: f64,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        a: 6_378_137.0,
        f: 1.0 / 298.257_223_563,
    };

    pub const BESSEL_1841: Ellipsoid = Ellipsoid {
        a: 6_377_397.155,
        f: 1.0 / 299.152_812_8,
    };

    /// First eccentricity squared.
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// Second eccentricity squared.
    pub fn ep2(&self) -> f64 {
        let e2 = self.e2();
        e2 / (1.0 - e2)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wgs84_eccentricity() {
        let e2 = Ellipsoid::WGS84.e2();
        assert!((e2 - 0.006_694_379_990_14).abs() < 1e-12);
        assert!(Ellipsoid::WGS84.ep2() > e2);
    }
}
