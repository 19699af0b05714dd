//! Geometry output selection.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use terrain_import::{GeometrySink, ObjWriter, PlyWriter};

/// File format of the written geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Wavefront OBJ, several objects per file
    Obj,
    /// ASCII PLY, a single object per file
    Ply,
}

impl OutputFormat {
    /// Format implied by a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("obj") {
            Some(Self::Obj)
        } else if ext.eq_ignore_ascii_case("ply") {
            Some(Self::Ply)
        } else {
            None
        }
    }
}

/// Create the sink writing to `path`.
///
/// An explicit `format` wins over the extension; OBJ is used when neither
/// decides.
pub fn open_sink(path: &Path, format: Option<OutputFormat>) -> Result<Box<dyn GeometrySink>> {
    let format = format
        .or_else(|| OutputFormat::from_path(path))
        .unwrap_or(OutputFormat::Obj);

    let sink: Box<dyn GeometrySink> = match format {
        OutputFormat::Obj => Box::new(
            ObjWriter::create(path).with_context(|| format!("Cannot create {:?}", path))?,
        ),
        OutputFormat::Ply => Box::new(
            PlyWriter::create(path).with_context(|| format!("Cannot create {:?}", path))?,
        ),
    };
    Ok(sink)
}
