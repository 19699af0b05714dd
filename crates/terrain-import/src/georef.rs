//! Reconciliation of the file CRS with the scene CRS.

use std::fmt;

use grid_common::{CrsId, ImportError, ImportResult, Xy};
use projection::{PointTransform, Reprojector};
use tracing::{debug, info};

use crate::scene::SceneGeoref;

/// How grid coordinates map to scene coordinates.
pub enum ReprojectionPlan {
    /// Grid and scene share a CRS.
    Identity,
    /// Grid coordinates are transformed into the scene CRS.
    Reprojecting {
        grid_crs: CrsId,
        scene_crs: CrsId,
        to_scene: Box<dyn PointTransform>,
        to_grid: Box<dyn PointTransform>,
    },
}

impl ReprojectionPlan {
    pub fn is_reprojecting(&self) -> bool {
        matches!(self, ReprojectionPlan::Reprojecting { .. })
    }

    /// Map a point from the grid CRS to the scene CRS.
    pub fn to_scene(&self, p: Xy) -> Xy {
        match self {
            ReprojectionPlan::Identity => p,
            ReprojectionPlan::Reprojecting { to_scene, .. } => {
                let (x, y) = to_scene.pt(p.x, p.y);
                Xy::new(x, y)
            }
        }
    }

    /// Map a point from the scene CRS back to the grid CRS.
    pub fn to_grid(&self, p: Xy) -> Xy {
        match self {
            ReprojectionPlan::Identity => p,
            ReprojectionPlan::Reprojecting { to_grid, .. } => {
                let (x, y) = to_grid.pt(p.x, p.y);
                Xy::new(x, y)
            }
        }
    }
}

impl fmt::Debug for ReprojectionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReprojectionPlan::Identity => f.write_str("Identity"),
            ReprojectionPlan::Reprojecting {
                grid_crs,
                scene_crs,
                ..
            } => f
                .debug_struct("Reprojecting")
                .field("grid_crs", grid_crs)
                .field("scene_crs", scene_crs)
                .finish_non_exhaustive(),
        }
    }
}

/// Outcome of CRS reconciliation.
#[derive(Debug)]
pub struct CrsResolution {
    pub plan: ReprojectionPlan,
    /// The scene had no CRS and adopted the file CRS
    pub scene_crs_adopted: bool,
}

/// Decide how grid coordinates reach the scene CRS.
///
/// - Scene without CRS: the file CRS is required and validated, then adopted
///   by the scene right away.
/// - Scene with CRS and no file CRS: the grid is assumed to be in the scene CRS.
/// - Both set and different: transforms in both directions are built.
pub fn resolve_reprojection(
    scene: &mut dyn SceneGeoref,
    file_crs: Option<&CrsId>,
    engine: &dyn Reprojector,
) -> ImportResult<CrsResolution> {
    let Some(scene_crs) = scene.crs().cloned() else {
        let file_crs = file_crs.ok_or_else(|| {
            ImportError::UnsupportedCrs("no CRS given and the scene has none".to_string())
        })?;
        engine.validate(file_crs)?;
        scene.set_crs(file_crs.clone());
        info!(crs = %file_crs, "Scene adopted the grid CRS");
        return Ok(CrsResolution {
            plan: ReprojectionPlan::Identity,
            scene_crs_adopted: true,
        });
    };

    let plan = match file_crs {
        None => {
            debug!(crs = %scene_crs, "No file CRS given, assuming the scene CRS");
            ReprojectionPlan::Identity
        }
        Some(file_crs) if *file_crs == scene_crs => ReprojectionPlan::Identity,
        Some(file_crs) => {
            let to_scene = engine.transformer(file_crs, &scene_crs)?;
            let to_grid = engine.transformer(&scene_crs, file_crs)?;
            info!(from = %file_crs, to = %scene_crs, "Reprojecting grid into scene CRS");
            ReprojectionPlan::Reprojecting {
                grid_crs: file_crs.clone(),
                scene_crs,
                to_scene,
                to_grid,
            }
        }
    };

    Ok(CrsResolution {
        plan,
        scene_crs_adopted: false,
    })
}
