use crate::geom::EPS;
use std::fmt;

/// A vertex of a shadow polygon on the solar array plane.
///
/// The array plane uses its own 2D frame: `x` runs along the array width
/// (`[0, D]`), `y` along its height (`[0, H]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if both points are very close to each other.
    pub fn is_close(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPS && (self.y - other.y).abs() < EPS
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2); // Default 2 decimals
        write!(f, "Point({:.prec$}, {:.prec$})", self.x, self.y, prec = prec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_close() {
        let pa = Point::new(5., 5.);
        let pb = Point::new(5.00000000000001, 5.);
        let pc = Point::new(5.0001, 5.);
        assert!(pa.is_close(&pb));
        assert!(!pa.is_close(&pc));
    }

    #[test]
    fn test_display_precision() {
        let p = Point::new(1.23456, 2.0);
        assert_eq!(format!("{:.1}", p), "Point(1.2, 2.0)");
        assert_eq!(format!("{}", p), "Point(1.23, 2.00)");
    }
}
