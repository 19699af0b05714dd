//! Vertex and face generation from decimated grid rows.

use asc_parser::GridRow;
use grid_common::{BoundingBox, GridHeader, Xy};
use nalgebra::Point3;
use tracing::debug;

use crate::config::{ImportMode, NodataPolicy};
use crate::georef::ReprojectionPlan;
use crate::origin::GridAnchorResolution;

/// Decimated grid geometry in scene-local coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridGeometry {
    /// Row-major, northernmost retained row first
    pub vertices: Vec<Point3<f64>>,
    /// Quads as vertex indices, empty for point clouds
    pub faces: Vec<[u32; 4]>,
}

impl GridGeometry {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Horizontal bounds of the vertices, `None` without vertices.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.vertices.iter().map(|v| (v.x, v.y)))
    }

    /// Lowest and highest vertex elevation, `None` without vertices.
    pub fn z_range(&self) -> Option<(f64, f64)> {
        self.vertices.iter().fold(None, |range, v| match range {
            None => Some((v.z, v.z)),
            Some((lo, hi)) => Some((lo.min(v.z), hi.max(v.z))),
        })
    }
}

/// Quads joining a lattice of `rows` x `cols` vertices stored row-major.
///
/// Each quad is `(i, i + cols, i + cols + 1, i + 1)`; no quad spans the end of
/// a row.
pub fn lattice_faces(rows: usize, cols: usize) -> Vec<[u32; 4]> {
    let quads = rows.saturating_sub(1) * cols.saturating_sub(1);
    let mut faces = Vec::with_capacity(quads);
    let step_ncols = cols as u32;

    let mut index: u32 = 0;
    for _ in 0..rows.saturating_sub(1) {
        for _ in 0..cols.saturating_sub(1) {
            let v1 = index;
            let v2 = v1 + step_ncols;
            let v3 = v2 + 1;
            let v4 = v1 + 1;
            faces.push([v1, v2, v3, v4]);
            index += 1;
        }
        index += 1;
    }
    faces
}

/// Accumulates vertices row by row and closes them into a mesh or cloud.
pub struct GeometryBuilder<'a> {
    header: &'a GridHeader,
    plan: &'a ReprojectionPlan,
    anchor: GridAnchorResolution,
    mode: ImportMode,
    nodata_policy: NodataPolicy,
    /// Divisor applied to horizontal coordinates
    scale: f64,
    step: usize,
    vertices: Vec<Point3<f64>>,
    /// Per-vertex nodata flag, tracked for `SkipFaces`
    nodata_mask: Vec<bool>,
    nodata_cells: usize,
    rows: usize,
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(
        header: &'a GridHeader,
        plan: &'a ReprojectionPlan,
        anchor: GridAnchorResolution,
        mode: ImportMode,
        step: usize,
    ) -> Self {
        let capacity = match mode {
            ImportMode::Mesh => {
                let (rows, cols) = header.decimated_dims(step);
                rows * cols
            }
            ImportMode::Cloud => 0,
        };

        Self {
            header,
            plan,
            anchor,
            mode,
            nodata_policy: NodataPolicy::Keep,
            scale: 1.0,
            step: step.max(1),
            vertices: Vec::with_capacity(capacity),
            nodata_mask: Vec::new(),
            nodata_cells: 0,
            rows: 0,
        }
    }

    pub fn nodata_policy(mut self, policy: NodataPolicy) -> Self {
        self.nodata_policy = policy;
        self
    }

    /// Divide vertex x/y by `scale`.
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Nodata cells seen among the retained cells so far.
    pub fn nodata_cells(&self) -> usize {
        self.nodata_cells
    }

    fn tracks_nodata_mask(&self) -> bool {
        self.mode == ImportMode::Mesh && self.nodata_policy == NodataPolicy::SkipFaces
    }

    /// Scene-local position of retained cell `(col, row.y)`.
    fn place(&self, col: usize, y: usize) -> Xy {
        let cellsize = self.header.cellsize;
        let offset = self.anchor.cell_offset;
        let local = Xy::new(
            (col * self.step) as f64 * cellsize + offset.x,
            y as f64 * cellsize + offset.y,
        );

        if self.plan.is_reprojecting() {
            let world = self.plan.to_scene(self.anchor.source_point + local.coords);
            Xy::from(world - self.anchor.target_point)
        } else {
            local
        }
    }

    pub fn push_row(&mut self, row: &GridRow) {
        for (col, &value) in row.values.iter().enumerate() {
            let nodata = self.header.is_nodata(value);
            if nodata {
                self.nodata_cells += 1;
                if self.mode == ImportMode::Cloud {
                    continue;
                }
            }

            let p = self.place(col, row.y);
            self.vertices
                .push(Point3::new(p.x / self.scale, p.y / self.scale, value));
            if self.tracks_nodata_mask() {
                self.nodata_mask.push(nodata);
            }
        }
        self.rows += 1;
    }

    pub fn finish(self) -> GridGeometry {
        let faces = match self.mode {
            ImportMode::Cloud => Vec::new(),
            ImportMode::Mesh => {
                let (_, cols) = self.header.decimated_dims(self.step);
                let faces = lattice_faces(self.rows, cols);
                if self.tracks_nodata_mask() {
                    let mask = &self.nodata_mask;
                    faces
                        .into_iter()
                        .filter(|face| face.iter().all(|&i| !mask[i as usize]))
                        .collect()
                } else {
                    faces
                }
            }
        };

        debug!(
            mode = self.mode.as_str(),
            rows = self.rows,
            vertices = self.vertices.len(),
            faces = faces.len(),
            nodata_cells = self.nodata_cells,
            "Built grid geometry"
        );

        GridGeometry {
            vertices: self.vertices,
            faces,
        }
    }
}
