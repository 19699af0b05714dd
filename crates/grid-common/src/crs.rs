//! Coordinate Reference System identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a coordinate reference system, e.g. `EPSG:32632`.
///
/// Identifiers are normalized on construction (trimmed, upper-cased) so two
/// spellings of the same code compare equal. Whether an identifier can be
/// resolved is decided by the reprojection engine, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CrsId(String);

impl CrsId {
    /// Parse and normalize an identifier.
    ///
    /// Accepts formats like:
    /// - "EPSG:4326"
    /// - "epsg:32632"
    /// - "CRS:84"
    pub fn parse(s: &str) -> Result<Self, CrsParseError> {
        let normalized = s.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(CrsParseError::Empty);
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(CrsParseError::InvalidFormat(s.to_string()));
        }
        Ok(Self(normalized))
    }

    /// Identifier for a numeric EPSG code.
    pub fn epsg(code: u32) -> Self {
        Self(format!("EPSG:{}", code))
    }

    /// The normalized identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric EPSG code, if this is an `EPSG:<n>` identifier.
    pub fn epsg_code(&self) -> Option<u32> {
        self.0.strip_prefix("EPSG:").and_then(|code| code.parse().ok())
    }
}

impl fmt::Display for CrsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CrsId {
    type Err = CrsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CrsId {
    type Error = CrsParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CrsId> for String {
    fn from(id: CrsId) -> Self {
        id.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CrsParseError {
    #[error("empty CRS identifier")]
    Empty,

    #[error("invalid CRS identifier: {0:?}")]
    InvalidFormat(String),
}
