//! Self-shadowing of the satellite solar array and the illumination case
//! table.
//!
//! The panel body is modelled as an unbounded light-blocking parallelogram
//! cast onto the array rectangle `[0, D] x [0, H]`. Which of the effective
//! areas (solar array, chassis) are lit is decided by the quadrants of the
//! two light-source elevation angles; two quadrant combinations need full
//! polygon arithmetic instead of a constant.

use crate::geom::region::{difference, intersection, union_all};
use crate::transform::{cartesian_to_spherical, SphericalAngles};
use crate::{Point, Polygon, Region, Vector};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Tolerance for treating `phi mod 180` as exactly vertical (90°).
const VERTICAL_TOL: f64 = 1e-9;

/// Minimum magnitude of `tan(phi)` before taking its reciprocal; keeps
/// `cot(phi)` finite near `phi = 0` and `phi = 180`.
const MIN_TAN_MAGNITUDE: f64 = 1e-10;

/// Bound on the shadow offsets near the cotangent singularity.
const MAX_OFFSET: f64 = 1e6;

/// Panel dimensions in meters: chassis length `L`, array width `D`,
/// array height `H`. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    l: f64,
    d: f64,
    h: f64,
}

impl Panel {
    pub fn new(l: f64, d: f64, h: f64) -> Result<Self> {
        if l <= 0.0 || d <= 0.0 || h <= 0.0 {
            return Err(anyhow!(
                "Panel dimensions must be positive, got L={}, D={}, H={}",
                l,
                d,
                h
            ));
        }
        Ok(Self { l, d, h })
    }

    pub fn l(&self) -> f64 {
        self.l
    }

    pub fn d(&self) -> f64 {
        self.d
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    /// Full solar array area `D * H`.
    pub fn a_sa(&self) -> f64 {
        self.d * self.h
    }

    /// Full chassis area `L * D`.
    pub fn a_chassis(&self) -> f64 {
        self.l * self.d
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            l: 1.3,
            d: 2.8,
            h: 8.1,
        }
    }
}

/// 90°-wide elevation bin of `phi`, the key of the illumination case table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quadrant {
    /// Classifies `phi` (degrees, any range) into its quadrant.
    ///
    /// Bins are `[0, 90)`, `[90, 180)`, `[180, 270]` and `(270, 360)`.
    /// The reference model is inconsistent about 270°; this classifier
    /// keeps it in Q3 (closed upper bound), matching the variant shipped
    /// with the case-table engine.
    pub fn from_phi(phi_deg: f64) -> Self {
        let phi = phi_deg.rem_euclid(360.0);
        if phi < 90.0 {
            Quadrant::Q1
        } else if phi < 180.0 {
            Quadrant::Q2
        } else if phi <= 270.0 {
            Quadrant::Q3
        } else {
            Quadrant::Q4
        }
    }
}

/// Shadow cast onto the array rectangle by one light source.
#[derive(Debug, Clone)]
pub struct Shadow {
    pub region: Region,
}

impl Shadow {
    fn empty() -> Self {
        Self {
            region: Region::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
    }

    pub fn area(&self) -> f64 {
        self.region.area()
    }

    /// Outer boundary vertices of the shadow (holes and any parts beyond
    /// the first are ignored).
    pub fn outline(&self) -> &[Point] {
        self.region
            .polygons()
            .first()
            .map(|p| p.vertices())
            .unwrap_or(&[])
    }
}

/// Effective illuminated areas in m²: solar array in `[0, D*H]`, chassis
/// in `[0, L*D]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveArea {
    pub solar_array: f64,
    pub chassis: f64,
}

/// Shadow projection and effective-area classification for one panel.
///
/// All operations are pure functions of the input angles; degenerate
/// geometry is clamped or mapped to empty shadows and never raised as an
/// error.
#[derive(Debug, Clone)]
pub struct ShadowCalculator {
    panel: Panel,
    rect: Polygon,
}

impl ShadowCalculator {
    pub fn new(panel: Panel) -> Result<Self> {
        let rect = Polygon::rectangle("solar_array", panel.d(), panel.h())?;
        Ok(Self { panel, rect })
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    /// Shadow cast by a light source at `(phi, theta)` degrees, clipped to
    /// the array rectangle.
    ///
    /// Near-vertical light (`phi mod 180 ~ 90°`) casts the plain rectangle
    /// `[0, D] x [0, L]` with no trigonometric offset. Otherwise the
    /// blocking parallelogram is offset by `L * cot(phi)` along theta,
    /// with `tan(phi)` clamped away from zero and the offsets bounded to
    /// `±1e6` near the singularity.
    pub fn calculate_shadow(&self, phi_deg: f64, theta_deg: f64) -> Shadow {
        let blocker = match self.shadow_parallelogram(phi_deg, theta_deg) {
            Ok(poly) => poly,
            // A collapsed ring (e.g. theta = ±90 exactly) casts no shadow.
            Err(_) => return Shadow::empty(),
        };
        Shadow {
            region: intersection(&blocker, &self.rect),
        }
    }

    fn shadow_parallelogram(&self, phi_deg: f64, theta_deg: f64) -> Result<Polygon> {
        let l = self.panel.l();
        let d = self.panel.d();

        if (phi_deg.rem_euclid(180.0) - 90.0).abs() < VERTICAL_TOL {
            return Polygon::rectangle("shadow", d, l);
        }

        let phi = phi_deg.to_radians();
        let theta = theta_deg.to_radians();

        let tan_phi = phi.tan();
        let tan_phi = if tan_phi.abs() < MIN_TAN_MAGNITUDE {
            if tan_phi.is_sign_negative() {
                -MIN_TAN_MAGNITUDE
            } else {
                MIN_TAN_MAGNITUDE
            }
        } else {
            tan_phi
        };
        let cot_phi = 1.0 / tan_phi;

        let x_offset = (l * cot_phi * theta.sin()).clamp(-MAX_OFFSET, MAX_OFFSET);
        let y_offset = (l * cot_phi * theta.cos()).clamp(-MAX_OFFSET, MAX_OFFSET);

        Polygon::new(
            "shadow",
            vec![
                Point::new(0.0, 0.0),
                Point::new(d, 0.0),
                Point::new(d - x_offset, y_offset),
                Point::new(-x_offset, y_offset),
            ],
        )
    }

    /// Area of the array rectangle left unshadowed by both light sources,
    /// together with their combined shadow region.
    pub fn combined_non_shadow(
        &self,
        phi_i: f64,
        theta_i: f64,
        phi_o: f64,
        theta_o: f64,
    ) -> (f64, Region) {
        let shadow_i = self.calculate_shadow(phi_i, theta_i);
        let shadow_o = self.calculate_shadow(phi_o, theta_o);
        let combined = union_all(&[&shadow_i.region, &shadow_o.region]);
        let non_shadow = difference(&self.rect, &combined);
        (non_shadow.area(), combined)
    }

    /// Polygon-arithmetic path for the Q1xQ4 and Q4xQ4 quadrant pairs.
    ///
    /// Both elevations are remapped into a shared local frame first:
    /// a Q1 incidence angle becomes 0, a Q4 angle becomes `phi - 270`;
    /// the observer angle always becomes `phi_o - 270`.
    pub fn special_case(&self, phi_i: f64, theta_i: f64, phi_o: f64, theta_o: f64) -> f64 {
        let phi_i_adj = match Quadrant::from_phi(phi_i) {
            Quadrant::Q1 => 0.0,
            _ => phi_i - 270.0,
        };
        let phi_o_adj = phi_o - 270.0;
        self.combined_non_shadow(phi_i_adj, theta_i, phi_o_adj, theta_o).0
    }

    /// Effective illuminated areas for a Sun direction `(phi_i, theta_i)`
    /// and an observer direction `(phi_o, theta_o)`, all in degrees.
    ///
    /// The quadrant pair of the two elevations selects the case; this match
    /// is total over all 16 combinations.
    pub fn effective_area(
        &self,
        phi_i: f64,
        theta_i: f64,
        phi_o: f64,
        theta_o: f64,
    ) -> EffectiveArea {
        use Quadrant::*;

        let a_sa = self.panel.a_sa();
        let a_chassis = self.panel.a_chassis();

        let (solar_array, chassis) = match (Quadrant::from_phi(phi_i), Quadrant::from_phi(phi_o)) {
            (Q1, Q3) => (0.0, 0.0),
            (Q1, Q4) => (self.special_case(phi_i, theta_i, phi_o, theta_o), 0.0),
            (Q2, Q3) => (a_sa, 0.0),
            (Q2, Q4) => (0.0, 0.0),
            (Q3, Q3) => (a_sa, a_chassis),
            (Q3, Q4) => (0.0, a_chassis),
            (Q4, Q3) => (0.0, a_chassis),
            (Q4, Q4) => (self.special_case(phi_i, theta_i, phi_o, theta_o), a_chassis),
            // Every pair with the observer in Q1 or Q2 is dark.
            _ => (0.0, 0.0),
        };

        EffectiveArea {
            solar_array,
            chassis,
        }
    }

    /// Same classification for Cartesian direction vectors.
    ///
    /// Zero-length directions take the `(0, 0)` sentinel angles; results
    /// are identical to [`Self::effective_area`] for equivalent inputs.
    pub fn effective_area_from_vectors(&self, sun_dir: Vector, obs_dir: Vector) -> EffectiveArea {
        let sentinel = SphericalAngles {
            phi: 0.0,
            theta: 0.0,
        };
        let i = cartesian_to_spherical(sun_dir).unwrap_or(sentinel);
        let o = cartesian_to_spherical(obs_dir).unwrap_or(sentinel);
        self.effective_area(i.phi, i.theta, o.phi, o.theta)
    }
}
