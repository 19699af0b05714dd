//! Destinations for imported geometry.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use grid_common::{ImportError, ImportResult};
use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::geometry::GridGeometry;

/// A named piece of geometry placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    /// Translation from the scene origin (z is always 0)
    pub location: Vector3<f64>,
    pub geometry: GridGeometry,
}

impl SceneObject {
    /// Vertices translated by the object location.
    pub fn placed_vertices(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.geometry.vertices.iter().map(move |v| *v + self.location)
    }
}

/// Receives finished objects. Called once per successful import.
pub trait GeometrySink {
    fn insert(&mut self, object: SceneObject) -> ImportResult<()>;
}

fn sink_error(err: io::Error) -> ImportError {
    ImportError::Sink(err.to_string())
}

/// Collects objects in memory; the last inserted object is the active one.
#[derive(Debug, Default)]
pub struct InMemoryScene {
    pub objects: Vec<SceneObject>,
}

impl InMemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&SceneObject> {
        self.objects.last()
    }

    pub fn get(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl GeometrySink for InMemoryScene {
    fn insert(&mut self, object: SceneObject) -> ImportResult<()> {
        self.objects.push(object);
        Ok(())
    }
}

/// Writes objects as Wavefront OBJ.
///
/// Several objects can share one file; face indices are 1-based and global.
pub struct ObjWriter<W: Write> {
    writer: W,
    vertices_written: usize,
}

impl ObjWriter<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> ImportResult<Self> {
        let file = File::create(path.as_ref()).map_err(|e| {
            ImportError::Sink(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ObjWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            vertices_written: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_object(&mut self, object: &SceneObject) -> io::Result<()> {
        let w = &mut self.writer;
        writeln!(w, "o {}", object.name)?;
        for v in object.placed_vertices() {
            writeln!(w, "v {} {} {}", v.x, v.y, v.z)?;
        }

        let base = self.vertices_written + 1;
        for face in &object.geometry.faces {
            write!(w, "f")?;
            for &i in face {
                write!(w, " {}", i as usize + base)?;
            }
            writeln!(w)?;
        }
        w.flush()
    }
}

impl<W: Write> GeometrySink for ObjWriter<W> {
    fn insert(&mut self, object: SceneObject) -> ImportResult<()> {
        self.write_object(&object).map_err(sink_error)?;
        self.vertices_written += object.geometry.vertex_count();
        debug!(name = %object.name, "Wrote OBJ object");
        Ok(())
    }
}

/// Writes a single object as ASCII PLY.
pub struct PlyWriter<W: Write> {
    writer: W,
    written: bool,
}

impl PlyWriter<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> ImportResult<Self> {
        let file = File::create(path.as_ref()).map_err(|e| {
            ImportError::Sink(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> PlyWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            written: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_object(&mut self, object: &SceneObject) -> io::Result<()> {
        let w = &mut self.writer;
        let faces = &object.geometry.faces;

        writeln!(w, "ply")?;
        writeln!(w, "format ascii 1.0")?;
        writeln!(w, "comment object {}", object.name)?;
        writeln!(w, "element vertex {}", object.geometry.vertex_count())?;
        writeln!(w, "property double x")?;
        writeln!(w, "property double y")?;
        writeln!(w, "property double z")?;
        if !faces.is_empty() {
            writeln!(w, "element face {}", faces.len())?;
            writeln!(w, "property list uchar uint vertex_indices")?;
        }
        writeln!(w, "end_header")?;

        for v in object.placed_vertices() {
            writeln!(w, "{} {} {}", v.x, v.y, v.z)?;
        }
        for [a, b, c, d] in faces {
            writeln!(w, "4 {} {} {} {}", a, b, c, d)?;
        }
        w.flush()
    }
}

impl<W: Write> GeometrySink for PlyWriter<W> {
    fn insert(&mut self, object: SceneObject) -> ImportResult<()> {
        if self.written {
            return Err(ImportError::Sink(
                "a PLY file holds a single object".to_string(),
            ));
        }
        self.write_object(&object).map_err(sink_error)?;
        self.written = true;
        debug!(name = %object.name, "Wrote PLY object");
        Ok(())
    }
}
