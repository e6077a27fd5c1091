//! Linear interpolation and anti-aliased downsampling.
//!
//! # Example
//!
//! ```rust
//! use phac_analysis::resample::downsample;
//!
//! let signal: Vec<f64> = (0..1000)
//!     .map(|i| (2.0 * std::f64::consts::PI * 5.0 * i as f64 / 1000.0).sin())
//!     .collect();
//! let slow = downsample(&signal, 1000.0, 100.0, 20.0).unwrap();
//! assert_eq!(slow.len(), 100);
//! ```

use crate::error::{PacError, Result};
use phac_core::{ButterworthDesign, PassBand, filtfilt};

/// Piecewise-linear interpolation of the points `(xp, fp)` at each `x`.
///
/// `xp` must be increasing. Queries left of `xp[0]` take `fp[0]`, queries
/// right of the last point take the last value.
pub fn interp(x: &[f64], xp: &[f64], fp: &[f64]) -> Result<Vec<f64>> {
    if xp.len() != fp.len() {
        return Err(PacError::LengthMismatch {
            left: xp.len(),
            right: fp.len(),
        });
    }
    let (Some(&first), Some(&last)) = (fp.first(), fp.last()) else {
        return Err(PacError::EmptyInput);
    };

    Ok(x.iter()
        .map(|&xi| {
            let upper = xp.partition_point(|&p| p <= xi);
            if upper == 0 {
                first
            } else if upper == xp.len() {
                last
            } else {
                let lower = upper - 1;
                let t = (xi - xp[lower]) / (xp[upper] - xp[lower]);
                fp[lower] + t * (fp[upper] - fp[lower])
            }
        })
        .collect())
}

/// Low-pass filters `signal` at `fmax` and resamples it linearly from
/// `sr_old` to `sr_new`.
///
/// The output has `round(len * sr_new / sr_old)` samples at times
/// `i / sr_new`. With equal rates only the filter is applied.
///
/// # Errors
///
/// `InvalidConfiguration` when `sr_new > sr_old` or `fmax > 0.4 * sr_new`;
/// filter errors for a malformed cutoff or a too short signal.
pub fn downsample(signal: &[f64], sr_old: f64, sr_new: f64, fmax: f64) -> Result<Vec<f64>> {
    for rate in [sr_old, sr_new] {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(PacError::InvalidSamplingRate(rate));
        }
    }
    if sr_new > sr_old {
        return Err(PacError::InvalidConfiguration(format!(
            "new sampling rate {sr_new} Hz exceeds old rate {sr_old} Hz"
        )));
    }
    if fmax > 0.4 * sr_new {
        return Err(PacError::InvalidConfiguration(format!(
            "fmax {fmax} Hz must not exceed 0.8 times the new Nyquist frequency"
        )));
    }

    let design = ButterworthDesign::new(sr_old, PassBand::Lowpass { cutoff_hz: fmax })?;
    let filtered = filtfilt(&design, signal)?;
    if sr_old == sr_new {
        return Ok(filtered);
    }

    let t_old: Vec<f64> = (0..filtered.len()).map(|i| i as f64 / sr_old).collect();
    let num_samples = (filtered.len() as f64 / sr_old * sr_new).round() as usize;
    let t_new: Vec<f64> = (0..num_samples).map(|i| i as f64 / sr_new).collect();
    tracing::debug!(sr_old, sr_new, fmax, num_samples, "downsampled signal");
    interp(&t_new, &t_old, &filtered)
}
