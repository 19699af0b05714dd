//! Import configuration.

use std::env;
use std::str::FromStr;

use grid_common::{CrsId, ImportError, ImportResult};
use serde::{Deserialize, Serialize};

/// What kind of geometry an import produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// One vertex per retained cell, connected by quad faces.
    #[default]
    Mesh,
    /// One vertex per retained cell with data, no faces.
    Cloud,
}

impl ImportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mesh => "mesh",
            Self::Cloud => "cloud",
        }
    }
}

impl FromStr for ImportMode {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mesh" => Ok(Self::Mesh),
            "cloud" => Ok(Self::Cloud),
            other => Err(ImportError::invalid_parameter(
                "mode",
                format!("expected 'mesh' or 'cloud', got '{}'", other),
            )),
        }
    }
}

/// How mesh imports treat nodata cells.
///
/// Cloud imports always drop nodata cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodataPolicy {
    /// Keep nodata cells as vertices at the sentinel height.
    #[default]
    Keep,
    /// Keep every vertex but omit faces touching a nodata cell.
    SkipFaces,
}

impl FromStr for NodataPolicy {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "keep" => Ok(Self::Keep),
            "skip_faces" => Ok(Self::SkipFaces),
            other => Err(ImportError::invalid_parameter(
                "nodata_policy",
                format!("expected 'keep' or 'skip_faces', got '{}'", other),
            )),
        }
    }
}

/// Settings shared by every import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Geometry kind
    pub mode: ImportMode,
    /// Keep every `step`-th row and column
    pub step: usize,
    /// Mesh nodata handling
    pub nodata_policy: NodataPolicy,
    /// Divide scene-local coordinates by the scene scale
    pub apply_scale: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            mode: ImportMode::Mesh,
            step: 1,
            nodata_policy: NodataPolicy::Keep,
            apply_scale: false,
        }
    }
}

impl ImportConfig {
    /// Load settings from environment variables, falling back to defaults.
    ///
    /// Unparsable values are ignored in favor of the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            mode: env::var("ASC_IMPORT_MODE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.mode),
            step: env::var("ASC_IMPORT_STEP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.step),
            nodata_policy: env::var("ASC_NODATA_POLICY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.nodata_policy),
            apply_scale: env::var("ASC_APPLY_SCALE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.apply_scale),
        }
    }

    /// Validate the settings.
    pub fn validate(&self) -> ImportResult<()> {
        if self.step == 0 {
            return Err(ImportError::invalid_parameter("step", "must be at least 1"));
        }
        Ok(())
    }
}

/// Parameters of a single import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportParams {
    /// CRS of the file; required when the scene has none
    pub crs: Option<CrsId>,
    pub config: ImportConfig,
}

impl ImportParams {
    pub fn new(crs: Option<CrsId>) -> Self {
        Self {
            crs,
            config: ImportConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ImportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn mode(mut self, mode: ImportMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn step(mut self, step: usize) -> Self {
        self.config.step = step;
        self
    }

    pub fn nodata_policy(mut self, policy: NodataPolicy) -> Self {
        self.config.nodata_policy = policy;
        self
    }

    pub fn apply_scale(mut self, apply: bool) -> Self {
        self.config.apply_scale = apply;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ImportConfig::default();
        assert_eq!(config.mode, ImportMode::Mesh);
        assert_eq!(config.step, 1);
        assert_eq!(config.nodata_policy, NodataPolicy::Keep);
        assert!(!config.apply_scale);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_step_is_invalid() {
        let config = ImportConfig {
            step: 0,
            ..Default::default()
        };
        match config.validate() {
            Err(ImportError::InvalidParameter { param, .. }) => assert_eq!(param, "step"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("MESH".parse::<ImportMode>().unwrap(), ImportMode::Mesh);
        assert_eq!(" cloud ".parse::<ImportMode>().unwrap(), ImportMode::Cloud);
        assert!("points".parse::<ImportMode>().is_err());
    }

    #[test]
    fn test_nodata_policy_from_str() {
        assert_eq!("keep".parse::<NodataPolicy>().unwrap(), NodataPolicy::Keep);
        assert_eq!(
            "skip-faces".parse::<NodataPolicy>().unwrap(),
            NodataPolicy::SkipFaces
        );
        assert!("drop".parse::<NodataPolicy>().is_err());
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let config: ImportConfig = serde_json::from_str(r#"{"mode":"cloud"}"#).unwrap();
        assert_eq!(config.mode, ImportMode::Cloud);
        assert_eq!(config.step, 1);

        let config: ImportConfig =
            serde_json::from_str(r#"{"nodata_policy":"skip_faces","step":4}"#).unwrap();
        assert_eq!(config.nodata_policy, NodataPolicy::SkipFaces);
        assert_eq!(config.step, 4);
    }

    #[test]
    fn test_params_builder() {
        let params = ImportParams::new(Some(CrsId::epsg(32632)))
            .mode(ImportMode::Cloud)
            .step(3)
            .apply_scale(true);
        assert_eq!(params.crs, Some(CrsId::epsg(32632)));
        assert_eq!(params.config.mode, ImportMode::Cloud);
        assert_eq!(params.config.step, 3);
        assert!(params.config.apply_scale);
    }
}
