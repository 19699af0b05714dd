//! Error types for grid import.

use thiserror::Error;

/// Result type alias using ImportError.
pub type ImportResult<T> = Result<T, ImportError>;

/// Every failure that aborts an import.
///
/// None of these are retried; the caller surfaces them as a single failure
/// and nothing is committed to the scene's geometry sink.
#[derive(Debug, Error)]
pub enum ImportError {
    // === Input Errors ===
    #[error("Unreadable file: {0}")]
    UnreadableFile(String),

    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    #[error("Truncated grid at body row {row}: {reason}")]
    TruncatedGrid { row: usize, reason: String },

    // === Georeference Errors ===
    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),

    #[error("Scene georeference is broken, please fix it beforehand")]
    BrokenGeoreference,

    // === Operation Errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Failed to insert geometry: {0}")]
    Sink(String),
}

impl ImportError {
    /// Create a MalformedHeader error.
    pub fn malformed_header(msg: impl Into<String>) -> Self {
        Self::MalformedHeader(msg.into())
    }

    /// Create a TruncatedGrid error for a body row (0 = first body line).
    pub fn truncated(row: usize, reason: impl Into<String>) -> Self {
        Self::TruncatedGrid {
            row,
            reason: reason.into(),
        }
    }

    /// Create an InvalidParameter error.
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Short stable code for this error, suitable for logs and exit reports.
    pub fn kind(&self) -> &'static str {
        match self {
            ImportError::UnreadableFile(_) => "UnreadableFile",
            ImportError::MalformedHeader(_) => "MalformedHeader",
            ImportError::TruncatedGrid { .. } => "TruncatedGrid",
            ImportError::UnsupportedCrs(_) => "UnsupportedCRS",
            ImportError::BrokenGeoreference => "BrokenGeoreference",
            ImportError::InvalidParameter { .. } => "InvalidParameter",
            ImportError::Sink(_) => "SinkError",
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::UnreadableFile(err.to_string())
    }
}

impl From<crate::crs::CrsParseError> for ImportError {
    fn from(err: crate::crs::CrsParseError) -> Self {
        ImportError::UnsupportedCrs(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_is_unreadable_file() {
        let err: ImportError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.kind(), "UnreadableFile");
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_truncated_message() {
        let err = ImportError::truncated(3, "expected 10 values, found 7");
        assert_eq!(
            err.to_string(),
            "Truncated grid at body row 3: expected 10 values, found 7"
        );
    }
}
