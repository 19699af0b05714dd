//! Header model of an ESRI ASCII grid.

use crate::{BoundingBox, ImportError, ImportResult, Offset, Xy};

/// Georeferenced anchor of the grid's lower-left cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// Lower-left corner of the lower-left cell (`xllcorner`/`yllcorner`).
    Corner(Xy),
    /// Center of the lower-left cell (`xllcenter`/`yllcenter`).
    Center(Xy),
}

impl Anchor {
    /// The anchor coordinate in the grid's own reference system.
    pub fn point(&self) -> Xy {
        match self {
            Anchor::Corner(p) | Anchor::Center(p) => *p,
        }
    }
}

/// Parsed header of an ASCII grid.
///
/// Invariants: `nrows >= 1`, `ncols >= 1`, `cellsize > 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridHeader {
    /// Number of rows (Y direction)
    pub nrows: usize,
    /// Number of columns (X direction)
    pub ncols: usize,
    /// Uniform cell edge length in grid units
    pub cellsize: f64,
    /// Sentinel marking a cell without data
    pub nodata_value: f64,
    /// Placement of the lower-left cell
    pub anchor: Anchor,
}

impl GridHeader {
    /// Create a header, checking the dimension and cell size invariants.
    pub fn new(
        nrows: usize,
        ncols: usize,
        cellsize: f64,
        nodata_value: f64,
        anchor: Anchor,
    ) -> ImportResult<Self> {
        if nrows == 0 || ncols == 0 {
            return Err(ImportError::malformed_header(format!(
                "grid dimensions must be positive, got {} rows x {} cols",
                nrows, ncols
            )));
        }
        if !(cellsize > 0.0) || !cellsize.is_finite() {
            return Err(ImportError::malformed_header(format!(
                "cellsize must be a positive number, got {}",
                cellsize
            )));
        }

        Ok(Self {
            nrows,
            ncols,
            cellsize,
            nodata_value,
            anchor,
        })
    }

    /// Per-vertex offset aligning cell corners in world space.
    ///
    /// Zero for corner anchors, half a cell towards south-west for center anchors.
    pub fn cell_offset(&self) -> Offset {
        match self.anchor {
            Anchor::Corner(_) => Offset::zeros(),
            Anchor::Center(_) => Offset::new(-self.cellsize / 2.0, -self.cellsize / 2.0),
        }
    }

    /// Geometric center of the grid in the grid's reference system.
    pub fn geometric_center(&self) -> Xy {
        self.anchor.point()
            + self.cell_offset()
            + Offset::new(
                self.ncols as f64 / 2.0 * self.cellsize,
                self.nrows as f64 / 2.0 * self.cellsize,
            )
    }

    /// Extent covered by the cells, in the grid's reference system.
    pub fn extent(&self) -> BoundingBox {
        let ll = self.anchor.point() + self.cell_offset();
        BoundingBox::new(
            ll.x,
            ll.y,
            ll.x + self.ncols as f64 * self.cellsize,
            ll.y + self.nrows as f64 * self.cellsize,
        )
    }

    /// Rows and columns retained when reading every `step`-th cell.
    pub fn decimated_dims(&self, step: usize) -> (usize, usize) {
        let step = step.max(1);
        (self.nrows.div_ceil(step), self.ncols.div_ceil(step))
    }

    /// Whether `value` is the nodata sentinel.
    pub fn is_nodata(&self, value: f64) -> bool {
        value == self.nodata_value
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.nrows * self.ncols
    }

    /// Always false for a validated header.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner_header() -> GridHeader {
        GridHeader::new(4, 6, 10.0, -9999.0, Anchor::Corner(Xy::new(1000.0, 2000.0))).unwrap()
    }

    #[test]
    fn test_rejects_invalid_dimensions() {
        let anchor = Anchor::Corner(Xy::origin());
        assert!(GridHeader::new(0, 5, 1.0, -9999.0, anchor).is_err());
        assert!(GridHeader::new(5, 0, 1.0, -9999.0, anchor).is_err());
        assert!(GridHeader::new(5, 5, 0.0, -9999.0, anchor).is_err());
        assert!(GridHeader::new(5, 5, -2.0, -9999.0, anchor).is_err());
        assert!(GridHeader::new(5, 5, f64::NAN, -9999.0, anchor).is_err());
    }

    #[test]
    fn test_corner_geometry() {
        let header = corner_header();
        assert_eq!(header.cell_offset(), Offset::zeros());
        assert_eq!(header.geometric_center(), Xy::new(1030.0, 2020.0));

        let extent = header.extent();
        assert_eq!(extent, BoundingBox::new(1000.0, 2000.0, 1060.0, 2040.0));
    }

    #[test]
    fn test_center_anchor_shifts_half_cell() {
        let header =
            GridHeader::new(4, 6, 10.0, -9999.0, Anchor::Center(Xy::new(1005.0, 2005.0))).unwrap();
        assert_eq!(header.cell_offset(), Offset::new(-5.0, -5.0));
        // Same cells as the corner-anchored grid above
        assert_eq!(header.geometric_center(), Xy::new(1030.0, 2020.0));
        assert_eq!(header.extent(), corner_header().extent());
    }

    #[test]
    fn test_decimated_dims() {
        let header = corner_header();
        assert_eq!(header.decimated_dims(1), (4, 6));
        assert_eq!(header.decimated_dims(2), (2, 3));
        assert_eq!(header.decimated_dims(4), (1, 2));
        assert_eq!(header.decimated_dims(100), (1, 1));
    }
}
