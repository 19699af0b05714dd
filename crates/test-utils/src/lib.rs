//! Shared test utilities for the terrain importer workspace.
//!
//! This crate provides common testing infrastructure including:
//! - ASCII grid text generators
//! - Common grid fixtures (small hand-checked grids and realistic headers)
//! - Temporary grid files
//! - Approximate float assertions
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, AscGridBuilder};
//! ```

pub mod files;
pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use files::*;
pub use generators::*;

/// Distance between `left` and `right` when it exceeds `tolerance`.
///
/// NaN on either side always counts as a mismatch.
#[doc(hidden)]
pub fn excess_distance(left: f64, right: f64, tolerance: f64) -> Option<f64> {
    let distance = (left - right).abs();
    (!(distance <= tolerance)).then_some(distance)
}

/// Assert that two scalars agree within a tolerance.
///
/// ```ignore
/// assert_approx_eq!(bounds.min_x, -50.0, 1e-9);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let (left, right, tolerance) = ($left as f64, $right as f64, $tolerance as f64);
        if let Some(distance) = $crate::excess_distance(left, right, tolerance) {
            panic!(
                "assertion failed: {} ≈ {}\n  left: {:?}\n right: {:?}\n  off by {:?} (tolerance {:?})",
                stringify!($left),
                stringify!($right),
                left,
                right,
                distance,
                tolerance
            );
        }
    }};
}

/// Assert that two `(x, y)` tuples agree within a tolerance on both axes.
///
/// ```ignore
/// assert_coords_approx_eq!(to_grid.pt(x, y), (690_000.0, 5_330_000.0), 1e-2);
/// ```
#[macro_export]
macro_rules! assert_coords_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let (lx, ly): (f64, f64) = $left;
        let (rx, ry): (f64, f64) = $right;
        let tolerance = $tolerance as f64;
        let dx = $crate::excess_distance(lx, rx, tolerance);
        let dy = $crate::excess_distance(ly, ry, tolerance);
        if dx.is_some() || dy.is_some() {
            panic!(
                "assertion failed: coordinates differ\n  left: ({:?}, {:?})\n right: ({:?}, {:?})\n  tolerance {:?}",
                lx, ly, rx, ry, tolerance
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(1.0001, 1.0, 0.001);
        assert_approx_eq!(0.0, 0.0, 0.0001);
        assert_approx_eq!(-5.5, -5.500001, 0.0001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_rejects_nan() {
        assert_approx_eq!(f64::NAN, 1.0, 0.001);
    }

    #[test]
    fn test_assert_coords_approx_eq_passes() {
        let point = (1.0001, 2.0001);
        assert_coords_approx_eq!(point, (1.0, 2.0), 0.001);
    }

    #[test]
    #[should_panic(expected = "coordinates differ")]
    fn test_assert_coords_approx_eq_checks_y() {
        assert_coords_approx_eq!((1.0, 2.5), (1.0, 2.0), 0.001);
    }
}
