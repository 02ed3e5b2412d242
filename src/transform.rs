//! Conversions between 3D direction vectors and the angle pairs consumed by
//! the shadow engine.
//!
//! The `(phi, theta)` convention here is the satellite model's own, not the
//! textbook spherical one: `phi` is reconstructed from `asin(z)` and the
//! sign of `x` into the full `[0, 360)` range, because downstream the
//! quadrant of `phi` selects the illumination case.

use crate::Vector;
use anyhow::{anyhow, Result};

/// Below this, a cross product is treated as parallel input vectors.
const DEGENERATE_CROSS: f64 = 1e-10;

/// Angular distance from ±90° within which `phi` counts as a pole
/// (azimuth undefined there).
const POLE_TOL: f64 = 1e-9;

/// Elevation/azimuth angle pair in degrees.
///
/// `phi` is in `[0, 360)` and determines the illumination quadrant.
/// `theta` is in `[-90, 90]` and only enters the shadow-parallelogram
/// construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalAngles {
    pub phi: f64,
    pub theta: f64,
}

/// Altitude/azimuth pairs of the Sun and the satellite in the
/// observer-centered frame, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverAngles {
    pub sun_alt: f64,
    pub sun_az: f64,
    pub sat_alt: f64,
    pub sat_az: f64,
}

/// Converts a direction vector to the model's `(phi, theta)` angles.
///
/// The vector is normalized first; returns `None` for a zero-length input.
/// At the poles (`|phi| ~ 90°`) `theta` is defined as 0. `sin(theta)` is
/// clamped to `[-1, 1]` to absorb floating-point overshoot.
pub fn cartesian_to_spherical(v: Vector) -> Option<SphericalAngles> {
    let v = v.normalize()?;

    // z = sin(phi); asin covers [-90, 90], the sign of x picks the rest.
    let phi_rad = v.dz.asin();
    let phi_deg = if v.dx > 0.0 {
        phi_rad.to_degrees().rem_euclid(360.0)
    } else {
        180.0 - phi_rad.to_degrees()
    };

    // y = cos(phi) * sin(theta)
    let theta_deg = if (phi_deg.abs() - 90.0).abs() < POLE_TOL {
        0.0
    } else {
        let sin_theta = (v.dy / phi_rad.cos()).clamp(-1.0, 1.0);
        sin_theta.asin().to_degrees()
    };

    Some(SphericalAngles {
        phi: phi_deg.rem_euclid(360.0),
        theta: theta_deg,
    })
}

/// Builds the observer-centered right-handed frame and expresses both
/// directions in it as altitude/azimuth pairs.
///
/// `z_s` points toward Earth's center (`-sat_dir`). `y_s` is normal to the
/// plane spanned by `z_s` and the Sun direction; when those are
/// near-parallel the world up axis `(0, 1, 0)` projected orthogonal to
/// `z_s` is used instead, and `(1, 0, 0)` if that is degenerate too.
///
/// Fails only on zero-length input, which the row-ingestion layer is
/// expected to reject beforehand.
pub fn observer_frame(sun_dir: Vector, sat_dir: Vector) -> Result<ObserverAngles> {
    let sun = sun_dir
        .normalize()
        .ok_or_else(|| anyhow!("Sun direction has zero length"))?;
    let sat = sat_dir
        .normalize()
        .ok_or_else(|| anyhow!("Satellite direction has zero length"))?;

    let z_s = -sat;

    let cross = z_s.cross(sun);
    let cross_len = cross.length();
    let y_s = if cross_len < DEGENERATE_CROSS {
        let up = Vector::new(0.0, 1.0, 0.0);
        let proj = up - z_s * up.dot(z_s);
        let proj_len = proj.length();
        if proj_len < DEGENERATE_CROSS {
            Vector::new(1.0, 0.0, 0.0)
        } else {
            proj * (1.0 / proj_len)
        }
    } else {
        cross * (1.0 / cross_len)
    };

    let x_s = y_s.cross(z_s);
    let x_s = x_s * (1.0 / x_s.length());

    let sun_local = into_frame(sun, x_s, y_s, z_s);
    let sat_local = into_frame(-sat, x_s, y_s, z_s);

    let (sun_alt, sun_az) = to_alt_az(sun_local);
    let (sat_alt, sat_az) = to_alt_az(sat_local);

    Ok(ObserverAngles {
        sun_alt,
        sun_az,
        sat_alt,
        sat_az,
    })
}

/// Angle between two directions in degrees (the solar phase angle when the
/// inputs are the Sun and observer directions).
///
/// Returns 0 if either vector has zero length.
pub fn phase_angle(a: Vector, b: Vector) -> f64 {
    let (na, nb) = match (a.normalize(), b.normalize()) {
        (Some(na), Some(nb)) => (na, nb),
        _ => return 0.0,
    };
    na.dot(nb).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Components of `v` in the orthonormal frame `(x_s, y_s, z_s)`.
fn into_frame(v: Vector, x_s: Vector, y_s: Vector, z_s: Vector) -> Vector {
    Vector::new(v.dot(x_s), v.dot(y_s), v.dot(z_s))
}

/// Altitude `asin(z/|v|)` and azimuth `atan2(y, x) mod 360`, in degrees.
fn to_alt_az(v: Vector) -> (f64, f64) {
    let altitude = (v.dz / v.length()).asin().to_degrees();
    let azimuth = v.dy.atan2(v.dx).to_degrees().rem_euclid(360.0);
    (altitude, azimuth)
}
