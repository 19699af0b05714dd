//! Test data generators for synthetic ASCII grids.
//!
//! These generators create predictable, verifiable grids that can be used
//! across the test suite.

use std::fmt::Write;

/// Creates a grid with predictable values, in body (north to south) order.
///
/// Each cell value is calculated as: `body_row * 1000 + col`, where body row 0
/// is the first (northernmost) line of the file.
///
/// # Example
///
/// ```
/// use test_utils::create_ramp_grid;
///
/// let grid = create_ramp_grid(10, 5);
/// assert_eq!(grid.len(), 50);
/// assert_eq!(grid[1], 1.0);     // body_row=0, col=1
/// assert_eq!(grid[10], 1000.0); // body_row=1, col=0
/// ```
pub fn create_ramp_grid(ncols: usize, nrows: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(ncols * nrows);
    for row in 0..nrows {
        for col in 0..ncols {
            data.push((row * 1000 + col) as f64);
        }
    }
    data
}

/// Creates a smooth hill shaped elevation grid (meters), peaking at the center.
pub fn create_elevation_grid(ncols: usize, nrows: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(ncols * nrows);
    let cx = ncols as f64 / 2.0;
    let cy = nrows as f64 / 2.0;
    let radius = (cx * cx + cy * cy).sqrt().max(1.0);

    for row in 0..nrows {
        for col in 0..ncols {
            let dx = col as f64 - cx;
            let dy = row as f64 - cy;
            let falloff = 1.0 - (dx * dx + dy * dy).sqrt() / radius;
            data.push((400.0 + 800.0 * falloff).round());
        }
    }
    data
}

/// Which lower-left anchor keys the generated header uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    Corner,
    Center,
}

/// Builder for ESRI ASCII grid text.
///
/// # Example
///
/// ```
/// use test_utils::AscGridBuilder;
///
/// let text = AscGridBuilder::new(2, 2)
///     .cellsize(10.0)
///     .values(vec![1.0, 2.0, 3.0, 4.0])
///     .build();
/// assert!(text.starts_with("ncols 2\nnrows 2\n"));
/// assert!(text.ends_with("1 2\n3 4\n"));
/// ```
#[derive(Debug, Clone)]
pub struct AscGridBuilder {
    ncols: usize,
    nrows: usize,
    x: f64,
    y: f64,
    anchor: AnchorKind,
    cellsize: f64,
    nodata: f64,
    values: Vec<f64>,
    separator: String,
    upper_case_keys: bool,
}

impl AscGridBuilder {
    /// A corner-anchored grid at the origin with ramp values.
    pub fn new(ncols: usize, nrows: usize) -> Self {
        Self {
            ncols,
            nrows,
            x: 0.0,
            y: 0.0,
            anchor: AnchorKind::Corner,
            cellsize: 1.0,
            nodata: -9999.0,
            values: create_ramp_grid(ncols, nrows),
            separator: " ".to_string(),
            upper_case_keys: false,
        }
    }

    /// Anchor the lower-left cell corner at `(x, y)`.
    pub fn corner(mut self, x: f64, y: f64) -> Self {
        self.anchor = AnchorKind::Corner;
        self.x = x;
        self.y = y;
        self
    }

    /// Anchor the lower-left cell center at `(x, y)`.
    pub fn center(mut self, x: f64, y: f64) -> Self {
        self.anchor = AnchorKind::Center;
        self.x = x;
        self.y = y;
        self
    }

    pub fn cellsize(mut self, cellsize: f64) -> Self {
        self.cellsize = cellsize;
        self
    }

    pub fn nodata(mut self, nodata: f64) -> Self {
        self.nodata = nodata;
        self
    }

    /// Replace all values (body order, northernmost row first).
    pub fn values(mut self, values: Vec<f64>) -> Self {
        assert_eq!(
            values.len(),
            self.ncols * self.nrows,
            "value count must match grid dimensions"
        );
        self.values = values;
        self
    }

    /// Set one cell, addressed by body row (0 = first line) and column.
    pub fn with_value(mut self, body_row: usize, col: usize, value: f64) -> Self {
        self.values[body_row * self.ncols + col] = value;
        self
    }

    /// Mark one cell as nodata.
    pub fn with_nodata_at(self, body_row: usize, col: usize) -> Self {
        let nodata = self.nodata;
        self.with_value(body_row, col, nodata)
    }

    /// Token separator used in the body (e.g. `"\t"` or `"   "`).
    pub fn separator(mut self, separator: &str) -> Self {
        self.separator = separator.to_string();
        self
    }

    /// Write header keys in upper case, as some GIS exporters do.
    pub fn upper_case_keys(mut self) -> Self {
        self.upper_case_keys = true;
        self
    }

    /// Header lines only.
    pub fn header(&self) -> String {
        let (xkey, ykey) = match self.anchor {
            AnchorKind::Corner => ("xllcorner", "yllcorner"),
            AnchorKind::Center => ("xllcenter", "yllcenter"),
        };
        let lines = [
            ("ncols", self.ncols.to_string()),
            ("nrows", self.nrows.to_string()),
            (xkey, self.x.to_string()),
            (ykey, self.y.to_string()),
            ("cellsize", self.cellsize.to_string()),
            ("nodata_value", self.nodata.to_string()),
        ];

        let mut out = String::new();
        for (key, value) in lines {
            let key = if self.upper_case_keys {
                key.to_uppercase()
            } else {
                key.to_string()
            };
            let _ = writeln!(out, "{} {}", key, value);
        }
        out
    }

    /// Complete grid text.
    pub fn build(&self) -> String {
        let mut out = self.header();
        for row in self.values.chunks(self.ncols.max(1)) {
            let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            out.push_str(&line.join(&self.separator));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_grid_pattern() {
        let grid = create_ramp_grid(3, 2);
        assert_eq!(grid, vec![0.0, 1.0, 2.0, 1000.0, 1001.0, 1002.0]);
    }

    #[test]
    fn test_elevation_grid_peaks_in_center() {
        let grid = create_elevation_grid(9, 9);
        let center = grid[4 * 9 + 4];
        assert!(grid.iter().all(|&v| v <= center));
        assert!(grid[0] < center);
    }

    #[test]
    fn test_builder_center_header() {
        let text = AscGridBuilder::new(1, 1)
            .center(2.5, 7.5)
            .upper_case_keys()
            .build();
        assert!(text.contains("XLLCENTER 2.5\n"));
        assert!(text.contains("YLLCENTER 7.5\n"));
        assert!(text.contains("NODATA_VALUE -9999\n"));
    }

    #[test]
    fn test_builder_nodata_cell() {
        let text = AscGridBuilder::new(2, 1)
            .nodata(-1.0)
            .values(vec![5.0, 6.0])
            .with_nodata_at(0, 1)
            .separator("\t")
            .build();
        assert!(text.ends_with("5\t-1\n"));
    }
}
