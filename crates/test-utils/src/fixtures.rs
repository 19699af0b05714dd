//! Common test fixtures for terrain import tests.
//!
//! This module provides pre-defined grids that represent common scenarios:
//! the small worked examples used throughout the test suite and headers
//! shaped like real national elevation models.

/// 2x2 corner-anchored grid, cellsize 10, body rows `[1, 2]` then `[3, 4]`.
pub const TWO_BY_TWO: &str = "\
ncols 2
nrows 2
xllcorner 0
yllcorner 0
cellsize 10
nodata_value -9999
1 2
3 4
";

/// 3x3 grid with a single nodata cell in the middle of the body.
pub const WITH_NODATA: &str = "\
ncols 3
nrows 3
xllcorner 0
yllcorner 0
cellsize 1
NODATA_value -9999
1 2 3
4 -9999 6
7 8 9
";

/// Center-anchored grid in Swiss LV95 style coordinates (meters).
pub const CENTER_ANCHORED_LV95: &str = "\
ncols 4
nrows 3
xllcenter 2600012.5
yllcenter 1200012.5
cellsize 25
nodata_value -9999
500 501 502 503
510 511 512 513
520 521 522 523
";

/// Grid in UTM zone 32N (EPSG:32632), 30 m cells near Munich.
pub const UTM_32N: &str = "\
ncols 5
nrows 4
xllcorner 690000
yllcorner 5330000
cellsize 30
nodata_value -32768
520 521 522 523 524
518 519 520 521 522
516 517 518 519 520
514 515 516 517 518
";

/// Header only: the body is missing entirely.
pub const HEADER_ONLY: &str = "\
ncols 3
nrows 2
xllcorner 0
yllcorner 0
cellsize 1
nodata_value -9999
";

/// Common header values for testing.
pub mod header {
    /// Corner of the UTM fixture
    pub const UTM_32N_CORNER: (f64, f64) = (690000.0, 5330000.0);

    /// Geometric center of the UTM fixture (5 cols x 4 rows of 30 m)
    pub const UTM_32N_CENTER: (f64, f64) = (690075.0, 5330060.0);

    /// Geometric center of the LV95 fixture (4 cols x 3 rows of 25 m)
    pub const LV95_CENTER: (f64, f64) = (2600050.0, 1200037.5);
}
