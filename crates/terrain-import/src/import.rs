//! The import operation.

use std::io::BufRead;
use std::path::Path;
use std::time::Instant;

use asc_parser::{open_grid_file, AsciiGridReader};
use grid_common::{BoundingBox, ImportError, ImportResult};
use nalgebra::Vector3;
use projection::Reprojector;
use tracing::{info, warn};

use crate::config::ImportParams;
use crate::geometry::GeometryBuilder;
use crate::georef::{resolve_reprojection, ReprojectionPlan};
use crate::origin::reconcile_origin;
use crate::scene::SceneGeoref;
use crate::sink::{GeometrySink, SceneObject};

/// Report of a successful import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    /// Name of the inserted object
    pub name: String,
    /// Translation of the object from the scene origin
    pub location: Vector3<f64>,
    pub vertex_count: usize,
    pub face_count: usize,
    /// Nodata cells among the retained cells
    pub nodata_cells: usize,
    /// Horizontal bounds of the placed geometry, relative to the scene origin
    pub bounds: Option<BoundingBox>,
    /// Lowest and highest elevation
    pub z_range: Option<(f64, f64)>,
    /// The scene adopted the grid CRS
    pub crs_established: bool,
    /// The scene origin was set to the grid center
    pub origin_established: bool,
    pub reprojected: bool,
}

/// Import an ASCII grid from a file.
///
/// The object is named after the file stem. A broken scene is reported
/// before the file is opened.
pub fn import_file(
    path: impl AsRef<Path>,
    scene: &mut dyn SceneGeoref,
    engine: &dyn Reprojector,
    sink: &mut dyn GeometrySink,
    params: &ImportParams,
) -> ImportResult<ImportOutcome> {
    if scene.is_broken() {
        return Err(ImportError::BrokenGeoreference);
    }
    let path = path.as_ref();
    let source = open_grid_file(path)?;
    import_grid(source, &object_name(path), scene, engine, sink, params)
}

/// Object name derived from a file path.
pub fn object_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "grid".to_string())
}

/// Import an ASCII grid read from `source` into `sink`.
///
/// The scene CRS may be adopted before later steps fail; the scene origin and
/// the sink are only touched once the geometry is complete.
pub fn import_grid<R: BufRead>(
    source: R,
    name: &str,
    scene: &mut dyn SceneGeoref,
    engine: &dyn Reprojector,
    sink: &mut dyn GeometrySink,
    params: &ImportParams,
) -> ImportResult<ImportOutcome> {
    let start = Instant::now();

    if scene.is_broken() {
        return Err(ImportError::BrokenGeoreference);
    }
    params.config.validate()?;
    let scale = if params.config.apply_scale {
        let scale = scene.scale();
        if !(scale > 0.0 && scale.is_finite()) {
            return Err(ImportError::invalid_parameter(
                "apply_scale",
                format!("scene scale {} cannot be applied", scale),
            ));
        }
        scale
    } else {
        1.0
    };

    info!(
        name = %name,
        mode = params.config.mode.as_str(),
        step = params.config.step,
        "Importing ASCII grid"
    );
    if scene.is_partially_georef() {
        warn!("Scene is partially georeferenced");
    }

    let resolution = resolve_reprojection(scene, params.crs.as_ref(), engine)?;
    let plan = resolution.plan;

    let reader = AsciiGridReader::new(source)?;
    let header = reader.header().clone();

    let placement = reconcile_origin(&header, &plan, scene.origin_prj());
    if let ReprojectionPlan::Reprojecting {
        grid_crs,
        scene_crs,
        ..
    } = &plan
    {
        info!("{} reprojected from {} to {}", name, grid_crs, scene_crs);
    }

    let mut builder = GeometryBuilder::new(
        &header,
        &plan,
        placement.anchor,
        params.config.mode,
        params.config.step,
    )
    .nodata_policy(params.config.nodata_policy)
    .scale(scale);

    for row in reader.into_rows(params.config.step)? {
        builder.push_row(&row?);
    }
    let nodata_cells = builder.nodata_cells();
    let geometry = builder.finish();

    let offset = placement.offset / scale;
    let location = Vector3::new(offset.x, offset.y, 0.0);
    let bounds = geometry.bounds().map(|b| b.translate(location.x, location.y));
    let outcome = ImportOutcome {
        name: name.to_string(),
        location,
        vertex_count: geometry.vertex_count(),
        face_count: geometry.face_count(),
        nodata_cells,
        bounds,
        z_range: geometry.z_range(),
        crs_established: resolution.scene_crs_adopted,
        origin_established: placement.establishes_origin(),
        reprojected: plan.is_reprojecting(),
    };

    sink.insert(SceneObject {
        name: name.to_string(),
        location,
        geometry,
    })?;

    if let Some(origin) = placement.staged_origin {
        scene.set_origin_prj(origin);
        info!(x = origin.x, y = origin.y, "Scene origin set to the grid center");
    }

    info!(
        name = %name,
        vertices = outcome.vertex_count,
        faces = outcome.face_count,
        nodata_cells = outcome.nodata_cells,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Import complete"
    );

    Ok(outcome)
}
