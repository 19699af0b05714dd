//! Error types for reprojection.

use grid_common::ImportError;
use thiserror::Error;

/// Errors raised while resolving coordinate reference systems.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// The identifier is not known to the engine.
    #[error("unsupported CRS: {0}")]
    UnsupportedCrs(String),

    /// A UTM zone outside 1..=60.
    #[error("invalid UTM zone {0}, expected 1-60")]
    InvalidZone(u32),
}

impl From<ProjectionError> for ImportError {
    fn from(err: ProjectionError) -> Self {
        match err {
            ProjectionError::UnsupportedCrs(id) => ImportError::UnsupportedCrs(id),
            other => ImportError::UnsupportedCrs(other.to_string()),
        }
    }
}
