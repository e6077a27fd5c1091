//! Circular phase helpers.
//!
//! Phases in this crate live in [0, 2π); differences between phases live in
//! [-π, π).

use crate::error::{PacError, Result};
use std::f64::consts::{PI, TAU};

/// Wraps `phase` into [0, 2π).
///
/// `rem_euclid` can round a tiny negative input up to exactly 2π; that case
/// maps to 0 so the half-open interval holds.
pub fn wrap_phase(phase: f64) -> f64 {
    let wrapped = phase.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Element-wise phase difference `phi0 - phi1` wrapped into [-π, π).
pub fn phase_difference(phi0: &[f64], phi1: &[f64]) -> Result<Vec<f64>> {
    if phi0.len() != phi1.len() {
        return Err(PacError::LengthMismatch {
            left: phi0.len(),
            right: phi1.len(),
        });
    }
    Ok(phi0
        .iter()
        .zip(phi1)
        .map(|(a, b)| wrap_phase(a - b + PI) - PI)
        .collect())
}
