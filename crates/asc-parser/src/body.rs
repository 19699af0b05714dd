//! Decimated walk over the ASCII grid body.
//!
//! Body rows are stored north to south, so the first line is grid row
//! `nrows - 1` and the last line is grid row `0`. Only every `step`-th row and
//! column is materialized; the rows in between are still read line by line
//! and discarded so the cursor stays aligned on any line-oriented stream.

use std::io::BufRead;

use grid_common::{ImportError, ImportResult};
use tracing::trace;

/// One retained row of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    /// Grid row index counted from the south edge (0 = southernmost row)
    pub y: usize,
    /// Values of the retained columns `0, step, 2*step, ...`
    pub values: Vec<f64>,
}

/// Iterator over retained rows, northernmost first.
///
/// Yields `ceil(nrows / step)` rows of `ceil(ncols / step)` values each, and
/// stops after the first error.
pub struct GridDecimator<R> {
    reader: R,
    nrows: usize,
    ncols: usize,
    step: usize,
    /// Next grid row to emit, `None` once exhausted
    next_y: Option<usize>,
    /// Body lines consumed so far
    lines_read: usize,
    line: String,
}

impl<R: BufRead> GridDecimator<R> {
    /// Create a decimator over a body positioned at its first (northernmost) row.
    pub fn new(reader: R, nrows: usize, ncols: usize, step: usize) -> ImportResult<Self> {
        if step == 0 {
            return Err(ImportError::invalid_parameter("step", "must be at least 1"));
        }

        Ok(Self {
            reader,
            nrows,
            ncols,
            step,
            next_y: nrows.checked_sub(1),
            lines_read: 0,
            line: String::new(),
        })
    }

    /// Number of rows this decimator yields.
    pub fn retained_rows(&self) -> usize {
        self.nrows.div_ceil(self.step)
    }

    /// Number of values in each yielded row.
    pub fn retained_cols(&self) -> usize {
        self.ncols.div_ceil(self.step)
    }

    /// Body lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    fn read_line(&mut self) -> ImportResult<()> {
        self.line.clear();
        let read = self
            .reader
            .read_line(&mut self.line)
            .map_err(|e| ImportError::truncated(self.lines_read, e.to_string()))?;
        if read == 0 {
            return Err(ImportError::truncated(
                self.lines_read,
                format!(
                    "file ended after {} of {} body rows",
                    self.lines_read, self.nrows
                ),
            ));
        }
        self.lines_read += 1;
        Ok(())
    }

    /// Parse the current line, validating all `ncols` tokens.
    fn parse_row(&self, row: usize) -> ImportResult<Vec<f64>> {
        let mut values = Vec::with_capacity(self.retained_cols());
        let mut count = 0;

        for (col, token) in self.line.split_ascii_whitespace().take(self.ncols).enumerate() {
            let value: f64 = token.parse().map_err(|_| {
                ImportError::truncated(row, format!("column {} is not a number: {:?}", col, token))
            })?;
            if col % self.step == 0 {
                values.push(value);
            }
            count += 1;
        }

        if count < self.ncols {
            return Err(ImportError::truncated(
                row,
                format!("expected {} values, found {}", self.ncols, count),
            ));
        }

        Ok(values)
    }

    fn next_row(&mut self, y: usize) -> ImportResult<GridRow> {
        let row = self.lines_read;
        self.read_line()?;
        let values = self.parse_row(row)?;

        // Discard the rows between this one and the next retained row, but
        // never read past the southernmost row.
        let skip = (self.step - 1).min(y);
        for _ in 0..skip {
            self.read_line()?;
        }
        if skip > 0 {
            trace!(y, skipped = skip, "Skipped decimated rows");
        }

        Ok(GridRow { y, values })
    }
}

impl<R: BufRead> Iterator for GridDecimator<R> {
    type Item = ImportResult<GridRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let y = self.next_y?;
        self.next_y = y.checked_sub(self.step);

        let result = self.next_row(y);
        if result.is_err() {
            self.next_y = None;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(body: &str, nrows: usize, ncols: usize, step: usize) -> ImportResult<Vec<GridRow>> {
        GridDecimator::new(body.as_bytes(), nrows, ncols, step)?.collect()
    }

    #[test]
    fn test_step_one_reads_every_row() {
        let rows = rows("1 2\n3 4\n", 2, 2, 1).unwrap();
        assert_eq!(
            rows,
            vec![
                GridRow { y: 1, values: vec![1.0, 2.0] },
                GridRow { y: 0, values: vec![3.0, 4.0] },
            ]
        );
    }

    #[test]
    fn test_step_two_keeps_every_other_cell() {
        let body = "0 1 2 3 4\n10 11 12 13 14\n20 21 22 23 24\n30 31 32 33 34\n40 41 42 43 44\n";
        let rows = rows(body, 5, 5, 2).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], GridRow { y: 4, values: vec![0.0, 2.0, 4.0] });
        assert_eq!(rows[1], GridRow { y: 2, values: vec![20.0, 22.0, 24.0] });
        assert_eq!(rows[2], GridRow { y: 0, values: vec![40.0, 42.0, 44.0] });
    }

    #[test]
    fn test_does_not_read_past_last_row() {
        // 4 rows with step 3: rows y=3 and y=0 retained, trailing text untouched
        let body = "1\n2\n3\n4\ntrailing garbage\n";
        let mut decimator = GridDecimator::new(body.as_bytes(), 4, 1, 3).unwrap();
        let values: Vec<f64> = decimator
            .by_ref()
            .map(|row| row.unwrap().values[0])
            .collect();
        assert_eq!(values, vec![1.0, 4.0]);
        assert_eq!(decimator.lines_read(), 4);
    }

    #[test]
    fn test_irregular_whitespace() {
        let rows = rows("  1\t 2   3 \r\n4 5 6\n", 2, 3, 1).unwrap();
        assert_eq!(rows[0].values, vec![1.0, 2.0, 3.0]);
        assert_eq!(rows[1].values, vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_extra_tokens_ignored() {
        let rows = rows("1 2 3\n", 1, 2, 1).unwrap();
        assert_eq!(rows[0].values, vec![1.0, 2.0]);
    }

    #[test]
    fn test_short_row_is_truncated() {
        let err = rows("1 2\n3\n", 2, 2, 1).unwrap_err();
        assert!(matches!(err, ImportError::TruncatedGrid { row: 1, .. }));
    }

    #[test]
    fn test_non_numeric_token_is_truncated() {
        let err = rows("1 x\n", 1, 2, 1).unwrap_err();
        assert!(matches!(err, ImportError::TruncatedGrid { row: 0, .. }));
    }

    #[test]
    fn test_missing_rows_is_truncated() {
        let err = rows("1 2\n", 3, 2, 1).unwrap_err();
        assert!(matches!(err, ImportError::TruncatedGrid { row: 1, .. }));

        // Ends inside the skipped rows
        let err = rows("1 2\n3 4\n", 3, 2, 2).unwrap_err();
        assert!(matches!(err, ImportError::TruncatedGrid { .. }));
    }

    #[test]
    fn test_stops_after_error() {
        let mut decimator = GridDecimator::new("1 2\n".as_bytes(), 3, 2, 1).unwrap();
        assert!(decimator.next().unwrap().is_ok());
        assert!(decimator.next().unwrap().is_err());
        assert!(decimator.next().is_none());
    }

    #[test]
    fn test_zero_step_rejected() {
        assert!(matches!(
            GridDecimator::new("".as_bytes(), 1, 1, 0),
            Err(ImportError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_retained_counts() {
        let decimator = GridDecimator::new("".as_bytes(), 7, 10, 3).unwrap();
        assert_eq!(decimator.retained_rows(), 3);
        assert_eq!(decimator.retained_cols(), 4);
    }
}
