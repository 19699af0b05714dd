//! Importer configuration file.
//!
//! Values may reference environment variables as `${VAR}` or
//! `${VAR:-default}`; they are substituted before the YAML is parsed.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use grid_common::CrsId;
use projection::{CrsRegistry, PredefinedCrs};
use serde::{Deserialize, Serialize};
use terrain_import::ImportConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImporterConfig {
    /// CRS assumed for input files when none is given on the command line
    pub default_crs: Option<CrsId>,
    /// Import settings
    pub import: ImportConfig,
    /// Systems listed by `--list-crs` besides the built-in ones
    pub predefined_crs: Vec<PredefinedCrs>,
}

impl ImporterConfig {
    /// Settings used when no configuration file is given.
    pub fn from_env() -> Self {
        Self {
            default_crs: std::env::var("ASC_DEFAULT_CRS")
                .ok()
                .and_then(|v| v.parse().ok()),
            import: ImportConfig::from_env(),
            predefined_crs: Vec::new(),
        }
    }

    /// Built-in systems followed by configured ones, without duplicates.
    pub fn crs_choices(&self) -> Vec<PredefinedCrs> {
        let mut seen = HashSet::new();
        CrsRegistry::builtin_predefined()
            .into_iter()
            .chain(self.predefined_crs.iter().cloned())
            .filter(|entry| seen.insert(entry.id.clone()))
            .collect()
    }

    /// Reprojection engine knowing the configured custom systems.
    pub fn registry(&self) -> CrsRegistry {
        let mut registry = CrsRegistry::new();
        registry.register_predefined(&self.predefined_crs);
        registry
    }

    pub fn validate(&self) -> Result<()> {
        self.import.validate().context("Invalid import settings")?;

        let mut seen = HashSet::new();
        for entry in &self.predefined_crs {
            if !seen.insert(&entry.id) {
                anyhow::bail!("Duplicate predefined CRS: {}", entry.id);
            }
        }
        Ok(())
    }
}

/// Load and validate a configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ImporterConfig> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read importer config from {:?}", path.as_ref()))?;

    let config = parse_config(&content)
        .with_context(|| format!("Failed to load importer config from {:?}", path.as_ref()))?;
    Ok(config)
}

/// Parse configuration text, substituting environment variables first.
pub fn parse_config(content: &str) -> Result<ImporterConfig> {
    let expanded = shellexpand::env(content).context("Environment substitution failed")?;

    let config: ImporterConfig =
        serde_yaml::from_str(&expanded).context("Failed to parse importer config YAML")?;

    config.validate()?;
    Ok(config)
}
