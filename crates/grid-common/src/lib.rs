//! Common types shared across the ASCII grid terrain importer crates.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod grid;

pub use bbox::BoundingBox;
pub use crs::{CrsId, CrsParseError};
pub use error::{ImportError, ImportResult};
pub use grid::{Anchor, GridHeader};

/// 2D point in a projected or geographic coordinate system.
pub type Xy = nalgebra::Point2<f64>;

/// 2D displacement between two [`Xy`] points.
pub type Offset = nalgebra::Vector2<f64>;
