//! Points in the unit square.

/// A point in the plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Point {
        Point { x, y }
    }
}

#[cfg(any(test, feature = "proptest-strategies"))]
#[doc(hidden)]
pub mod strategy {
    use super::*;
    use proptest::{collection::SizeRange, prelude::*, *};

    /// Point sets with coordinates in `[0, 1)`.
    pub fn points(count: impl Into<SizeRange>) -> impl Strategy<Value = Vec<Point>> {
        collection::vec((0.0..1.0f64, 0.0..1.0f64).prop_map(Point::from), count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pythagorean_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.3, 0.4);
        assert!((a.distance(&b) - 0.5).abs() < 1e-12);
        assert_eq!(a.distance(&b), b.distance(&a));
        assert_eq!(b.distance(&b), 0.0);
    }
}
