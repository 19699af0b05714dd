//! Scene-level georeference state.
//!
//! A scene is georeferenced once it carries both a CRS and a projected
//! origin. Imports may establish either value when the scene lacks it but
//! never replace one that is already set.

use grid_common::{CrsId, Xy};
use serde::{Deserialize, Serialize};

/// Georeference properties of the host scene.
pub trait SceneGeoref {
    /// CRS of the scene's projected coordinates.
    fn crs(&self) -> Option<&CrsId>;

    fn set_crs(&mut self, crs: CrsId);

    /// World point, in the scene CRS, that sits at the scene's local origin.
    fn origin_prj(&self) -> Option<Xy>;

    fn set_origin_prj(&mut self, origin: Xy);

    /// Scene units per CRS unit.
    fn scale(&self) -> f64;

    /// Whether the stored georeference is inconsistent.
    fn is_broken(&self) -> bool;

    fn has_crs(&self) -> bool {
        self.crs().is_some()
    }

    fn has_origin_prj(&self) -> bool {
        self.origin_prj().is_some()
    }

    /// Both CRS and origin are set.
    fn is_georef(&self) -> bool {
        self.has_crs() && self.has_origin_prj()
    }

    /// Exactly one of CRS and origin is set.
    fn is_partially_georef(&self) -> bool {
        self.has_crs() != self.has_origin_prj()
    }
}

/// Plain georeference record, persisted alongside a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneGeoreference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<CrsId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_prj: Option<Xy>,
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Set by the host when it detects a damaged georeference
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub broken: bool,
}

fn default_scale() -> f64 {
    1.0
}

impl Default for SceneGeoreference {
    fn default() -> Self {
        Self {
            crs: None,
            origin_prj: None,
            scale: default_scale(),
            broken: false,
        }
    }
}

impl SceneGeoreference {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_crs(mut self, crs: CrsId) -> Self {
        self.crs = Some(crs);
        self
    }

    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin_prj = Some(Xy::new(x, y));
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

impl SceneGeoref for SceneGeoreference {
    fn crs(&self) -> Option<&CrsId> {
        self.crs.as_ref()
    }

    fn set_crs(&mut self, crs: CrsId) {
        self.crs = Some(crs);
    }

    fn origin_prj(&self) -> Option<Xy> {
        self.origin_prj
    }

    fn set_origin_prj(&mut self, origin: Xy) {
        self.origin_prj = Some(origin);
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn is_broken(&self) -> bool {
        let bad_origin = self
            .origin_prj
            .is_some_and(|o| !o.x.is_finite() || !o.y.is_finite());
        self.broken || !(self.scale > 0.0 && self.scale.is_finite()) || bad_origin
    }
}
