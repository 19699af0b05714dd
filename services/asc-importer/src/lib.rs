//! Command line front end for the ASCII grid terrain importer.
//!
//! Loads configuration and the persisted scene georeference, runs imports
//! through `terrain-import`, and writes the results as OBJ or PLY.

pub mod config;
pub mod output;
pub mod scene_store;

pub use config::{load_config, ImporterConfig};
pub use output::{open_sink, OutputFormat};
pub use scene_store::{load_scene, save_scene};
