pub mod point;
pub mod polygon;
pub mod region;
pub mod vector;

/// Geometric precision
pub(crate) const EPS: f64 = 1e-13;

/// Polygon parts with an area below this are treated as degenerate
/// (slivers produced by boolean operations on touching edges).
pub(crate) const AREA_EPS: f64 = 1e-12;
