//! Import of ESRI ASCII grids into a georeferenced scene.
//!
//! An import reconciles the grid's CRS and anchor with the scene
//! georeference, decimates the grid body, and hands a quad mesh or point
//! cloud to a [`GeometrySink`]:
//!
//! ```text
//! scene CRS + file CRS ──► resolve_reprojection ──► ReprojectionPlan
//! header anchor + scene origin ──► reconcile_origin ──► Placement
//! body rows ──► GeometryBuilder ──► GridGeometry ──► GeometrySink
//! ```

pub mod config;
pub mod geometry;
pub mod georef;
pub mod import;
pub mod origin;
pub mod scene;
pub mod sink;

pub use config::{ImportConfig, ImportMode, ImportParams, NodataPolicy};
pub use geometry::{lattice_faces, GeometryBuilder, GridGeometry};
pub use georef::{resolve_reprojection, CrsResolution, ReprojectionPlan};
pub use import::{import_file, import_grid, object_name, ImportOutcome};
pub use origin::{reconcile_origin, GridAnchorResolution, Placement};
pub use scene::{SceneGeoref, SceneGeoreference};
pub use sink::{GeometrySink, InMemoryScene, ObjWriter, PlyWriter, SceneObject};
