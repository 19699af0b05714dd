//! Coordinate reference system transformations.
//!
//! Implements map projections from scratch without external dependencies.
//! Every transform pivots through geographic coordinates: the source system
//! is inverted to lon/lat, then projected into the target system. Geographic
//! coordinates use lon/lat axis order (x = longitude, y = latitude), in
//! degrees.

pub mod ellipsoid;
pub mod error;
pub mod mercator;
pub mod registry;
pub mod transform;
pub mod transverse_mercator;

pub use ellipsoid::Ellipsoid;
pub use error::ProjectionError;
pub use mercator::WebMercator;
pub use registry::{CrsRegistry, PredefinedCrs};
pub use transform::{PointTransform, Projection, Reproj, Reprojector};
pub use transverse_mercator::TransverseMercator;
