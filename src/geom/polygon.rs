use crate::geom::AREA_EPS;
use crate::Point;
use anyhow::{anyhow, Result};
use std::fmt;

/// A simple closed 2D ring, stored without the duplicated closing vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub name: String,
    pts: Vec<Point>,
}

impl Polygon {
    /// Creates a polygon from an ordered sequence of vertices.
    ///
    /// A duplicated closing vertex (first == last) is dropped. Fails if
    /// fewer than 3 distinct vertices remain or if the ring is degenerate
    /// (zero enclosed area, e.g. all vertices collinear).
    pub fn new(name: &str, pts: Vec<Point>) -> Result<Self> {
        let mut pts = pts;
        if pts.len() > 1 && pts[0].is_close(&pts[pts.len() - 1]) {
            pts.pop();
        }
        if pts.len() < 3 {
            return Err(anyhow!(
                "Polygon '{}' needs at least 3 vertices, got {}",
                name,
                pts.len()
            ));
        }
        if signed_area(&pts).abs() < AREA_EPS {
            return Err(anyhow!("Polygon '{}' has a degenerate (zero-area) ring", name));
        }
        Ok(Self {
            name: name.to_string(),
            pts,
        })
    }

    /// Creates the axis-aligned rectangle `[0, width] x [0, height]`.
    pub fn rectangle(name: &str, width: f64, height: f64) -> Result<Self> {
        Self::new(
            name,
            vec![
                Point::new(0., 0.),
                Point::new(width, 0.),
                Point::new(width, height),
                Point::new(0., height),
            ],
        )
    }

    pub fn vertices(&self) -> &[Point] {
        &self.pts
    }

    /// Enclosed area (shoelace formula, orientation-independent).
    pub fn area(&self) -> f64 {
        signed_area(&self.pts).abs()
    }

    /// Returns true if both polygons have the same vertices in the same
    /// cyclic order (possibly starting at a different vertex).
    pub fn is_close(&self, other: &Self) -> bool {
        let n = self.pts.len();
        if n != other.pts.len() {
            return false;
        }
        (0..n).any(|shift| {
            (0..n).all(|i| self.pts[i].is_close(&other.pts[(i + shift) % n]))
        })
    }
}

/// Signed shoelace area of a ring (positive for counter-clockwise).
fn signed_area(pts: &[Point]) -> f64 {
    let n = pts.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        let a = pts[i];
        let b = pts[(i + 1) % n];
        acc += a.x * b.y - b.x * a.y;
    }
    acc / 2.0
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon({}, {} vertices", self.name, self.pts.len())?;
        if f.alternate() {
            for p in &self.pts {
                write!(f, ", {}", p)?;
            }
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_area() -> Result<()> {
        let rect = Polygon::rectangle("rect", 2.8, 8.1)?;
        assert!((rect.area() - 22.68).abs() < 1e-12);
        assert_eq!(rect.vertices().len(), 4);
        Ok(())
    }

    #[test]
    fn test_closing_vertex_dropped() -> Result<()> {
        let poly = Polygon::new(
            "tri",
            vec![
                Point::new(0., 0.),
                Point::new(1., 0.),
                Point::new(0., 1.),
                Point::new(0., 0.),
            ],
        )?;
        assert_eq!(poly.vertices().len(), 3);
        assert!((poly.area() - 0.5).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_too_few_vertices() {
        let res = Polygon::new("line", vec![Point::new(0., 0.), Point::new(1., 0.)]);
        assert!(res.is_err());
    }

    #[test]
    fn test_collinear_ring_rejected() {
        let res = Polygon::new(
            "flat",
            vec![Point::new(0., 0.), Point::new(1., 0.), Point::new(2., 0.)],
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_area_orientation_independent() -> Result<()> {
        let ccw = Polygon::new(
            "ccw",
            vec![Point::new(0., 0.), Point::new(2., 0.), Point::new(2., 1.), Point::new(0., 1.)],
        )?;
        let cw = Polygon::new(
            "cw",
            vec![Point::new(0., 0.), Point::new(0., 1.), Point::new(2., 1.), Point::new(2., 0.)],
        )?;
        assert_eq!(ccw.area(), cw.area());
        Ok(())
    }

    #[test]
    fn test_is_close_rotated_start() -> Result<()> {
        let a = Polygon::new(
            "a",
            vec![Point::new(0., 0.), Point::new(1., 0.), Point::new(1., 1.), Point::new(0., 1.)],
        )?;
        let b = Polygon::new(
            "b",
            vec![Point::new(1., 1.), Point::new(0., 1.), Point::new(0., 0.), Point::new(1., 0.)],
        )?;
        assert!(a.is_close(&b));
        Ok(())
    }
}
