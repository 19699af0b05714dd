//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// An axis-aligned 2D bounding box.
///
/// Coordinates are in whatever units the owning reference system uses
/// (degrees for geographic CRS, meters for projected CRS, scene units for
/// local geometry).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box enclosing all points, `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut iter = points.into_iter();
        let (x, y) = iter.next()?;
        let mut bbox = Self::new(x, y, x, y);
        for (x, y) in iter {
            bbox.expand_to(x, y);
        }
        Some(bbox)
    }

    /// Grow the box so it includes the point.
    pub fn expand_to(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Center point of the box.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Check if a point is contained within this bbox.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Box shifted by `(dx, dy)`.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.min_x + dx, self.min_y + dy, self.max_x + dx, self.max_y + dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let bbox = BoundingBox::from_points([(1.0, 5.0), (-2.0, 3.0), (4.0, -1.0)]).unwrap();
        assert_eq!(bbox, BoundingBox::new(-2.0, -1.0, 4.0, 5.0));
        assert_eq!(bbox.width(), 6.0);
        assert_eq!(bbox.height(), 6.0);
        assert_eq!(bbox.center(), (1.0, 2.0));

        assert!(BoundingBox::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_translate_and_contains() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0).translate(5.0, -5.0);
        assert!(bbox.contains_point(5.0, -5.0));
        assert!(bbox.contains_point(15.0, 5.0));
        assert!(!bbox.contains_point(4.9, 0.0));
    }
}
