//! Scene georeference persisted as JSON between runs.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use terrain_import::SceneGeoreference;
use tracing::{debug, info};

/// Load the scene georeference, starting from an empty scene if the file
/// does not exist yet.
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneGeoreference> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "No scene file yet, starting from an empty scene");
        return Ok(SceneGeoreference::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene from {:?}", path))?;
    let scene: SceneGeoreference = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse scene from {:?}", path))?;

    debug!(path = %path.display(), ?scene, "Loaded scene georeference");
    Ok(scene)
}

/// Write the scene georeference as pretty-printed JSON.
pub fn save_scene<P: AsRef<Path>>(path: P, scene: &SceneGeoreference) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(scene).context("Failed to serialize scene")?;
    fs::write(path, json + "\n").with_context(|| format!("Failed to write scene to {:?}", path))?;

    info!(path = %path.display(), "Saved scene georeference");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_common::CrsId;

    #[test]
    fn test_missing_file_is_empty_scene() {
        let dir = tempfile::tempdir().unwrap();
        let scene = load_scene(dir.path().join("scene.json")).unwrap();
        assert_eq!(scene, SceneGeoreference::new());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        let scene = SceneGeoreference::new()
            .with_crs(CrsId::epsg(32632))
            .with_origin(690075.0, 5330060.0);

        save_scene(&path, &scene).unwrap();
        assert_eq!(load_scene(&path).unwrap(), scene);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_scene(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse scene"));
    }
}
