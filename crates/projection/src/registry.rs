//! Registry resolving CRS identifiers to projections.

use std::collections::HashMap;

use grid_common::CrsId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{PointTransform, Projection, ProjectionError, Reproj, Reprojector, TransverseMercator};

/// A named CRS offered to users, e.g. in a CRS picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredefinedCrs {
    /// Identifier, e.g. "EPSG:32632"
    pub id: CrsId,
    /// Human readable name
    pub name: String,
    /// Projection definition for identifiers the registry does not know natively
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection: Option<Projection>,
}

/// Built-in reprojection engine.
///
/// Resolves natively:
/// - `EPSG:4326`, `CRS:84` (geographic, lon/lat order)
/// - `EPSG:3857`, `EPSG:900913` (Web Mercator)
/// - `EPSG:326NN` / `EPSG:327NN` (WGS84 UTM zone NN north / south)
///
/// Further identifiers can be registered with an explicit [`Projection`].
#[derive(Debug, Clone, Default)]
pub struct CrsRegistry {
    custom: HashMap<CrsId, Projection>,
}

impl CrsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a custom identifier.
    pub fn register(&mut self, id: CrsId, projection: Projection) {
        debug!(crs = %id, ?projection, "Registered custom CRS");
        self.custom.insert(id, projection);
    }

    /// Register every predefined entry that carries a projection.
    pub fn register_predefined(&mut self, entries: &[PredefinedCrs]) {
        for entry in entries {
            if let Some(projection) = entry.projection {
                self.register(entry.id.clone(), projection);
            }
        }
    }

    /// Resolve an identifier.
    pub fn resolve(&self, id: &CrsId) -> Result<Projection, ProjectionError> {
        if let Some(projection) = self.custom.get(id) {
            return Ok(*projection);
        }

        match id.as_str() {
            "EPSG:4326" | "CRS:84" => return Ok(Projection::Geographic),
            "EPSG:3857" | "EPSG:900913" => return Ok(Projection::WebMercator),
            _ => {}
        }

        match id.epsg_code() {
            Some(code @ 32601..=32660) => Ok(Projection::TransverseMercator(
                TransverseMercator::utm(code - 32600, false)?,
            )),
            Some(code @ 32701..=32760) => Ok(Projection::TransverseMercator(
                TransverseMercator::utm(code - 32700, true)?,
            )),
            _ => Err(ProjectionError::UnsupportedCrs(id.to_string())),
        }
    }

    /// The default list of systems offered to users.
    pub fn builtin_predefined() -> Vec<PredefinedCrs> {
        let entry = |id: CrsId, name: &str| PredefinedCrs {
            id,
            name: name.to_string(),
            projection: None,
        };

        vec![
            entry(CrsId::epsg(4326), "WGS84 latlon"),
            entry(CrsId::epsg(3857), "Web Mercator"),
        ]
    }
}

impl Reprojector for CrsRegistry {
    fn validate(&self, crs: &CrsId) -> Result<(), ProjectionError> {
        self.resolve(crs).map(|_| ())
    }

    fn transformer(
        &self,
        from: &CrsId,
        to: &CrsId,
    ) -> Result<Box<dyn PointTransform>, ProjectionError> {
        let reproj = Reproj::new(self.resolve(from)?, self.resolve(to)?);
        Ok(Box::new(reproj))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_builtin() {
        let registry = CrsRegistry::new();
        assert_eq!(
            registry.resolve(&CrsId::epsg(4326)).unwrap(),
            Projection::Geographic
        );
        assert_eq!(
            registry.resolve(&"crs:84".parse().unwrap()).unwrap(),
            Projection::Geographic
        );
        assert_eq!(
            registry.resolve(&CrsId::epsg(900913)).unwrap(),
            Projection::WebMercator
        );
    }

    #[test]
    fn test_resolve_utm_zones() {
        let registry = CrsRegistry::new();
        match registry.resolve(&CrsId::epsg(32632)).unwrap() {
            Projection::TransverseMercator(tm) => {
                assert_eq!(tm.lon0, 9.0);
                assert_eq!(tm.false_northing, 0.0);
            }
            other => panic!("unexpected {:?}", other),
        }
        match registry.resolve(&CrsId::epsg(32756)).unwrap() {
            Projection::TransverseMercator(tm) => {
                assert_eq!(tm.lon0, 153.0);
                assert_eq!(tm.false_northing, 10_000_000.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unknown_identifier_is_unsupported() {
        let registry = CrsRegistry::new();
        for id in ["EPSG:2056", "EPSG:32600", "EPSG:32661", "IGNF:LAMB93"] {
            let id: CrsId = id.parse().unwrap();
            assert_eq!(
                registry.validate(&id),
                Err(ProjectionError::UnsupportedCrs(id.to_string()))
            );
        }
    }

    #[test]
    fn test_custom_registration() {
        let mut registry = CrsRegistry::new();
        let gk4 = TransverseMercator {
            lon0: 12.0,
            lat0: 0.0,
            k0: 1.0,
            false_easting: 4_500_000.0,
            false_northing: 0.0,
            ellipsoid: crate::Ellipsoid::BESSEL_1841,
        };
        registry.register_predefined(&[PredefinedCrs {
            id: CrsId::epsg(31468),
            name: "DHDN / 3-degree Gauss-Kruger zone 4".to_string(),
            projection: Some(Projection::TransverseMercator(gk4)),
        }]);

        assert!(registry.validate(&CrsId::epsg(31468)).is_ok());
        let (x, _) = registry
            .transform(&CrsId::epsg(4326), &CrsId::epsg(31468), 12.0, 48.0)
            .unwrap();
        assert!((x - 4_500_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_transform_roundtrip_utm_web_mercator() {
        let registry = CrsRegistry::new();
        let utm = CrsId::epsg(32632);
        let merc = CrsId::epsg(3857);

        let to_scene = registry.transformer(&utm, &merc).unwrap();
        let to_grid = registry.transformer(&merc, &utm).unwrap();
        for (x, y) in [(690_000.0, 5_330_000.0), (500_000.0, 5_000_000.0), (350_123.4, 5_600_987.6)] {
            let (mx, my) = to_scene.pt(x, y);
            let (x2, y2) = to_grid.pt(mx, my);
            test_utils::assert_coords_approx_eq!((x2, y2), (x, y), 1e-2);
        }
    }
}
