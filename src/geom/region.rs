//! Boolean set operations on 2D polygons.
//!
//! This module provides the set-operation contract the shadow engine is
//! written against: intersection, union and difference over simple polygons,
//! with multi-part and empty results as ordinary values.
//!
//! Results are a tagged [`Region`] so that every consumer pattern-matches
//! on the single/multi/empty distinction instead of probing result shapes.
//! The clipping itself is delegated to the `geo` crate.

use crate::{Point, Polygon};
use geo::{BooleanOps, Coord, LineString, MultiPolygon};

/// Result of a boolean operation: no region, one polygon, or several
/// disjoint polygons.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    Empty,
    Single(Polygon),
    Multi(Vec<Polygon>),
}

impl Region {
    /// Wraps a list of disjoint polygons in the matching variant.
    pub fn from_parts(parts: Vec<Polygon>) -> Self {
        let mut parts = parts;
        match parts.len() {
            0 => Region::Empty,
            1 => Region::Single(parts.remove(0)),
            _ => Region::Multi(parts),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Region::Empty)
    }

    /// All polygons of the region (empty slice for `Empty`).
    pub fn polygons(&self) -> &[Polygon] {
        match self {
            Region::Empty => &[],
            Region::Single(p) => std::slice::from_ref(p),
            Region::Multi(ps) => ps,
        }
    }

    /// Total area, summed over all disjoint parts.
    pub fn area(&self) -> f64 {
        self.polygons().iter().map(|p| p.area()).sum()
    }
}

/// Computes the intersection of two polygons.
///
/// Returns `Region::Empty` if the polygons do not overlap.
pub fn intersection(a: &Polygon, b: &Polygon) -> Region {
    let result = to_geo(a).intersection(&to_geo(b));
    from_geo(result, &format!("{}_intersect_{}", a.name, b.name))
}

/// Computes the union of any number of regions.
pub fn union_all(parts: &[&Region]) -> Region {
    let mut acc: Option<MultiPolygon<f64>> = None;
    for region in parts {
        if region.is_empty() {
            continue;
        }
        let mp = region_to_geo(region);
        acc = Some(match acc {
            None => mp,
            Some(merged) => merged.union(&mp),
        });
    }
    match acc {
        None => Region::Empty,
        Some(merged) => from_geo(merged, "union"),
    }
}

/// Computes `minuend - subtrahend`.
///
/// Subtracting an empty region returns the minuend unchanged. A subtrahend
/// covering the whole minuend yields `Region::Empty`.
pub fn difference(minuend: &Polygon, subtrahend: &Region) -> Region {
    if subtrahend.is_empty() {
        return Region::Single(minuend.clone());
    }
    let result = MultiPolygon::new(vec![to_geo(minuend)]).difference(&region_to_geo(subtrahend));
    from_geo(result, &format!("{}_remainder", minuend.name))
}

fn to_geo(poly: &Polygon) -> geo::Polygon<f64> {
    let coords: Vec<Coord<f64>> = poly
        .vertices()
        .iter()
        // `+ 0.0` normalizes -0.0 to +0.0 (value-identical); geo 0.28's
        // sweep ordering treats them as distinct and panics otherwise.
        .map(|p| Coord {
            x: p.x + 0.0,
            y: p.y + 0.0,
        })
        .collect();
    geo::Polygon::new(LineString::from(coords), vec![])
}

fn region_to_geo(region: &Region) -> MultiPolygon<f64> {
    MultiPolygon::new(region.polygons().iter().map(to_geo).collect())
}

/// Converts a `geo` result back to a [`Region`], keeping outer rings only.
///
/// Degenerate parts (zero-area slivers from touching edges) are dropped.
/// Interior rings cannot occur here: every operand in this engine shares the
/// target rectangle's bottom edge, so differences never enclose islands.
fn from_geo(mp: MultiPolygon<f64>, name: &str) -> Region {
    let count = mp.0.len();
    let mut parts = Vec::with_capacity(count);
    for (i, gp) in mp.0.iter().enumerate() {
        let pts: Vec<Point> = gp
            .exterior()
            .coords()
            .map(|c| Point::new(c.x, c.y))
            .collect();
        let part_name = if count == 1 {
            name.to_string()
        } else {
            format!("{}_{}", name, i)
        };
        if let Ok(poly) = Polygon::new(&part_name, pts) {
            parts.push(poly);
        }
    }
    Region::from_parts(parts)
}
