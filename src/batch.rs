//! Row schemas and parallel batch evaluation.
//!
//! The storage format (CSV and friends) is owned by the callers; this
//! module only fixes the logical records exchanged with them and maps the
//! engine over row slices. Rows are independent, so batches run on the
//! rayon thread pool; output order always matches input order.

use crate::shadow::{EffectiveArea, ShadowCalculator};
use crate::transform::{observer_frame, phase_angle};
use crate::Vector;
use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Input row in angle form, all in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleRow {
    pub phi_i: f64,
    pub theta_i: f64,
    pub phi_o: f64,
    pub theta_o: f64,
}

/// Input row in vector form: Sun direction `i`, observer direction `o`.
/// Components do not have to be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VectorRow {
    pub i_x: f64,
    pub i_y: f64,
    pub i_z: f64,
    pub o_x: f64,
    pub o_y: f64,
    pub o_z: f64,
}

impl VectorRow {
    pub fn sun_dir(&self) -> Vector {
        Vector::new(self.i_x, self.i_y, self.i_z)
    }

    pub fn obs_dir(&self) -> Vector {
        Vector::new(self.o_x, self.o_y, self.o_z)
    }
}

/// Output row consumed by the downstream brightness model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrightnessInput {
    pub phase_angle: f64,
    #[serde(rename = "A_eff_SA")]
    pub a_eff_sa: f64,
    #[serde(rename = "A_eff_chassis")]
    pub a_eff_chassis: f64,
}

/// Observer-frame altitude/azimuth row, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverRow {
    pub sun_alt: f64,
    pub sun_az: f64,
    pub sat_alt: f64,
    pub sat_az: f64,
}

/// Evaluates the case table for every angle row.
pub fn evaluate_angle_rows(calc: &ShadowCalculator, rows: &[AngleRow]) -> Vec<EffectiveArea> {
    rows.par_iter()
        .map(|row| calc.effective_area(row.phi_i, row.theta_i, row.phi_o, row.theta_o))
        .collect()
}

/// Evaluates the case table for every vector row, attaching the solar
/// phase angle between the two directions.
pub fn evaluate_vector_rows(calc: &ShadowCalculator, rows: &[VectorRow]) -> Vec<BrightnessInput> {
    rows.par_iter()
        .map(|row| {
            let sun = row.sun_dir();
            let obs = row.obs_dir();
            let eff = calc.effective_area_from_vectors(sun, obs);
            BrightnessInput {
                phase_angle: phase_angle(sun, obs),
                a_eff_sa: eff.solar_array,
                a_eff_chassis: eff.chassis,
            }
        })
        .collect()
}

/// Converts every vector row into observer-frame altitude/azimuth pairs.
///
/// Fails on the first row with a zero-length direction; vector rows are
/// expected to be pre-validated by the ingestion layer.
pub fn observer_frame_rows(rows: &[VectorRow]) -> Result<Vec<ObserverRow>> {
    rows.par_iter()
        .map(|row| {
            let angles = observer_frame(row.sun_dir(), row.obs_dir())?;
            Ok(ObserverRow {
                sun_alt: angles.sun_alt,
                sun_az: angles.sun_az,
                sat_alt: angles.sat_alt,
                sat_az: angles.sat_az,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shadow::Panel;

    fn calculator() -> ShadowCalculator {
        ShadowCalculator::new(Panel::default()).unwrap()
    }

    #[test]
    fn test_angle_rows_match_scalar_api() {
        let calc = calculator();
        let rows = vec![
            AngleRow { phi_i: 45.0, theta_i: -30.0, phi_o: 200.0, theta_o: 30.0 },
            AngleRow { phi_i: 135.0, theta_i: 45.0, phi_o: 200.0, theta_o: -45.0 },
            AngleRow { phi_i: 225.0, theta_i: 0.0, phi_o: 300.0, theta_o: -60.0 },
            AngleRow { phi_i: 280.0, theta_i: 15.0, phi_o: 280.0, theta_o: -30.0 },
        ];
        let results = evaluate_angle_rows(&calc, &rows);
        assert_eq!(results.len(), rows.len());
        for (row, result) in rows.iter().zip(&results) {
            let expected = calc.effective_area(row.phi_i, row.theta_i, row.phi_o, row.theta_o);
            assert_eq!(*result, expected);
        }
    }

    #[test]
    fn test_vector_rows_match_scalar_api() {
        let calc = calculator();
        let rows = vec![
            VectorRow { i_x: 1.0, i_y: 0.2, i_z: 0.5, o_x: 0.3, o_y: -0.4, o_z: -0.8 },
            VectorRow { i_x: -0.5, i_y: 0.1, i_z: 0.8, o_x: 0.9, o_y: 0.0, o_z: -0.3 },
        ];
        let results = evaluate_vector_rows(&calc, &rows);
        assert_eq!(results.len(), rows.len());
        for (row, result) in rows.iter().zip(&results) {
            let eff = calc.effective_area_from_vectors(row.sun_dir(), row.obs_dir());
            assert_eq!(result.a_eff_sa, eff.solar_array);
            assert_eq!(result.a_eff_chassis, eff.chassis);
            assert!((result.phase_angle - phase_angle(row.sun_dir(), row.obs_dir())).abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty_batch() {
        let calc = calculator();
        assert!(evaluate_angle_rows(&calc, &[]).is_empty());
        assert!(evaluate_vector_rows(&calc, &[]).is_empty());
    }

    #[test]
    fn test_observer_frame_rows() {
        let rows = vec![VectorRow {
            i_x: 1.0,
            i_y: 0.0,
            i_z: 0.0,
            o_x: 0.0,
            o_y: 0.0,
            o_z: 1.0,
        }];
        let out = observer_frame_rows(&rows).unwrap();
        assert_eq!(out.len(), 1);
        assert!((out[0].sat_alt - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_observer_frame_rows_zero_direction_fails() {
        let rows = vec![VectorRow {
            i_x: 0.0,
            i_y: 0.0,
            i_z: 0.0,
            o_x: 0.0,
            o_y: 0.0,
            o_z: 1.0,
        }];
        assert!(observer_frame_rows(&rows).is_err());
    }
}
