//! ESRI ASCII grid reader.
//!
//! An ASCII grid is a six line `key value` header followed by `nrows` lines
//! of `ncols` whitespace separated values, northernmost row first:
//!
//! ```text
//! ncols         4
//! nrows         3
//! xllcorner     2600000.0
//! yllcorner     1200000.0
//! cellsize      25.0
//! NODATA_value  -9999
//! 412.5 413.0 415.2 416.0
//! ...
//! ```
//!
//! The reader is strictly line oriented: the header consumes exactly six
//! lines and the body is walked forward once, so any [`BufRead`] works,
//! including pipes.

pub mod body;
pub mod header;

pub use body::{GridDecimator, GridRow};
pub use header::{parse_header, HEADER_LINES};

use grid_common::{GridHeader, ImportError, ImportResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// File extensions conventionally used for ASCII grids.
pub const ASCII_GRID_EXTENSIONS: &[&str] = &["asc", "grd"];

/// Whether `path` carries one of the [`ASCII_GRID_EXTENSIONS`].
pub fn has_grid_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ASCII_GRID_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Open a grid file for reading.
///
/// Failures carry the path and map to [`ImportError::UnreadableFile`].
pub fn open_grid_file(path: &Path) -> ImportResult<BufReader<File>> {
    let file = File::open(path)
        .map_err(|e| ImportError::UnreadableFile(format!("{}: {}", path.display(), e)))?;
    debug!(path = %path.display(), "Opened ASCII grid");
    Ok(BufReader::new(file))
}

/// An ASCII grid whose header has been read, positioned at the first body row.
pub struct AsciiGridReader<R> {
    header: GridHeader,
    body: R,
}

impl AsciiGridReader<BufReader<File>> {
    /// Open a grid file and read its header.
    ///
    /// The file handle is owned by the reader and closed when it is dropped,
    /// whichever way the import ends.
    pub fn open(path: impl AsRef<Path>) -> ImportResult<Self> {
        Self::new(open_grid_file(path.as_ref())?)
    }
}

impl<R: BufRead> AsciiGridReader<R> {
    /// Read the header from `reader`, leaving it at the first body row.
    pub fn new(mut reader: R) -> ImportResult<Self> {
        let header = parse_header(&mut reader)?;
        Ok(Self {
            header,
            body: reader,
        })
    }

    /// The parsed header.
    pub fn header(&self) -> &GridHeader {
        &self.header
    }

    /// Walk the body keeping every `step`-th row and column.
    pub fn into_rows(self, step: usize) -> ImportResult<GridDecimator<R>> {
        GridDecimator::new(self.body, self.header.nrows, self.header.ncols, step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_grid_extension() {
        assert!(has_grid_extension(Path::new("dem.asc")));
        assert!(has_grid_extension(Path::new("/data/DEM.GRD")));
        assert!(!has_grid_extension(Path::new("dem.tif")));
        assert!(!has_grid_extension(Path::new("dem")));
    }

    #[test]
    fn test_reader_positions_at_body() {
        let text = "ncols 2\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 1\nnodata_value -1\n1 2\n3 4\n";
        let reader = AsciiGridReader::new(text.as_bytes()).unwrap();
        assert_eq!(reader.header().ncols, 2);

        let rows: Vec<GridRow> = reader
            .into_rows(1)
            .unwrap()
            .collect::<ImportResult<_>>()
            .unwrap();
        assert_eq!(rows[0].values, vec![1.0, 2.0]);
        assert_eq!(rows[1].values, vec![3.0, 4.0]);
    }
}
