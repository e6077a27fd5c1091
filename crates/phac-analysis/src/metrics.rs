//! Coupling metrics on binned amplitudes and phase/amplitude pairs.
//!
//! # Modulation index
//!
//! Tort et al. (2010): the per-bin average amplitudes are normalised into a
//! distribution `P` over `N` bins and compared with the uniform distribution
//! through their KL distance, scaled by its maximum `ln N`:
//!
//! ```text
//! MI = (ln N - H(P)) / ln N = 1 + (1 / ln N) * Σ pᵢ ln pᵢ
//! ```
//!
//! A flat amplitude profile gives 0; all amplitude in one bin gives 1.
//!
//! # Mean phase coherence
//!
//! The complex mean of `aⱼ · e^{iφⱼ}`. Its magnitude grows with coupling
//! strength and its angle is the preferred phase.

use crate::binning::{PAC_NUM_BINS, bin_medians, indices_of_binned_phase};
use crate::error::{PacError, Result};
use rustfft::num_complex::Complex64;

/// Offset inside the logarithm and tolerance on the probability sum.
const SMALL: f64 = 1e-9;

/// Scales non-negative values so they sum to one.
///
/// # Errors
///
/// `InvalidDistribution` if any entry is negative (or NaN) or the sum is not
/// positive.
pub fn normalize(values: &[f64]) -> Result<Vec<f64>> {
    if values.iter().any(|v| v.is_nan() || *v < 0.0) {
        return Err(PacError::InvalidDistribution("values must be non-negative"));
    }
    let sum: f64 = values.iter().sum();
    if sum.is_nan() || sum <= 0.0 {
        return Err(PacError::InvalidDistribution("sum must be positive"));
    }
    Ok(values.iter().map(|v| v / sum).collect())
}

/// Shannon entropy `-Σ pᵢ ln(pᵢ + 1e-9)` of a probability distribution.
///
/// # Errors
///
/// `InvalidDistribution` if an entry lies outside [0, 1] or the entries do
/// not sum to one within 1e-9.
pub fn shannon_entropy(probabilities: &[f64]) -> Result<f64> {
    if probabilities.iter().any(|p| !(0.0..=1.0).contains(p)) {
        return Err(PacError::InvalidDistribution(
            "probabilities must lie in [0, 1]",
        ));
    }
    let sum: f64 = probabilities.iter().sum();
    if (sum - 1.0).abs() >= SMALL {
        return Err(PacError::InvalidDistribution("probabilities must sum to 1"));
    }
    Ok(-probabilities.iter().map(|p| p * (p + SMALL).ln()).sum::<f64>())
}

/// Modulation index of per-bin average amplitudes.
///
/// # Errors
///
/// `InvalidAmplitude` for a non-positive entry, `InvalidConfiguration` for
/// fewer than two bins.
///
/// # Example
///
/// ```rust
/// use phac_analysis::metrics::modulation_index;
///
/// let flat = modulation_index(&[2.0; 12]).unwrap();
/// assert!(flat.abs() < 1e-6);
///
/// let mut peaked = vec![1e-12; 12];
/// peaked[3] = 1.0;
/// assert!(modulation_index(&peaked).unwrap() > 0.99);
/// ```
pub fn modulation_index(average_amplitudes: &[f64]) -> Result<f64> {
    if let Some((index, &value)) = average_amplitudes
        .iter()
        .enumerate()
        .find(|&(_, &a)| a.is_nan() || a <= 0.0)
    {
        return Err(PacError::InvalidAmplitude { index, value });
    }
    if average_amplitudes.len() < 2 {
        return Err(PacError::InvalidConfiguration(format!(
            "modulation index needs at least 2 bins, got {}",
            average_amplitudes.len()
        )));
    }
    let distribution = normalize(average_amplitudes)?;
    let entropy = shannon_entropy(&distribution)?;
    Ok(1.0 - entropy / (distribution.len() as f64).ln())
}

/// Complex mean of `amplitude[j] · e^{i·phase[j]}`.
///
/// # Errors
///
/// `LengthMismatch` for arrays of different lengths, `EmptyInput` when both
/// are empty.
pub fn mean_phase_vector(phase: &[f64], amplitude: &[f64]) -> Result<Complex64> {
    if phase.len() != amplitude.len() {
        return Err(PacError::LengthMismatch {
            left: phase.len(),
            right: amplitude.len(),
        });
    }
    if phase.is_empty() {
        return Err(PacError::EmptyInput);
    }
    let sum: Complex64 = phase
        .iter()
        .zip(amplitude)
        .map(|(&phi, &a)| Complex64::from_polar(a, phi))
        .sum();
    Ok(sum / phase.len() as f64)
}

/// Magnitude of [`mean_phase_vector`].
pub fn mean_phase_coherence(phase: &[f64], amplitude: &[f64]) -> Result<f64> {
    mean_phase_vector(phase, amplitude).map(|z| z.norm())
}

/// Modulation index computed straight from per-sample phase and amplitude.
///
/// Phases are grouped into 12 bins, each bin is reduced to its median
/// amplitude and the medians feed [`modulation_index`].
pub fn binned_modulation_index(phase: &[f64], amplitude: &[f64]) -> Result<f64> {
    if phase.len() != amplitude.len() {
        return Err(PacError::LengthMismatch {
            left: phase.len(),
            right: amplitude.len(),
        });
    }
    let bins = indices_of_binned_phase(phase, PAC_NUM_BINS)?;
    modulation_index(&bin_medians(amplitude, &bins)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_normalize_sums_to_one() {
        let p = normalize(&[1.0, 3.0, 0.0, 4.0]).unwrap();
        assert_eq!(p, vec![0.125, 0.375, 0.0, 0.5]);
    }

    #[test]
    fn test_normalize_rejects_bad_input() {
        assert!(matches!(
            normalize(&[-1.0, 2.0]),
            Err(PacError::InvalidDistribution(_))
        ));
        assert!(normalize(&[0.0, 0.0]).is_err());
        assert!(normalize(&[]).is_err());
        assert!(normalize(&[f64::NAN, 1.0]).is_err());
    }

    #[test]
    fn test_entropy_of_point_mass_is_zero() {
        for x in [vec![1.0, 0.0, 0.0], vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0]] {
            let h = shannon_entropy(&normalize(&x).unwrap()).unwrap();
            assert!(h.abs() < 1e-8, "{h}");
        }
    }

    #[test]
    fn test_entropy_of_uniform_is_log_n() {
        for n in [3usize, 5] {
            let h = shannon_entropy(&normalize(&vec![1.0; n]).unwrap()).unwrap();
            assert!((h - (n as f64).ln()).abs() < 1e-8);
        }
    }

    #[test]
    fn test_entropy_rejects_non_distributions() {
        for p in [[-0.3, 0.5], [1.3, 0.5], [0.3, 0.5]] {
            assert!(shannon_entropy(&p).is_err(), "{p:?} accepted");
        }
    }

    #[test]
    fn test_modulation_index_rejects_non_positive() {
        assert!(matches!(
            modulation_index(&[-1.0, 1.0, 1.0]),
            Err(PacError::InvalidAmplitude { index: 0, .. })
        ));
        assert!(matches!(
            modulation_index(&[1.0, 0.0]),
            Err(PacError::InvalidAmplitude { index: 1, .. })
        ));
    }

    #[test]
    fn test_modulation_index_needs_two_bins() {
        assert!(matches!(
            modulation_index(&[1.0]),
            Err(PacError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_modulation_index_increases_with_contrast() {
        let profile = |depth: f64| -> Vec<f64> {
            (0..12)
                .map(|k| 1.0 + depth * (TAU * k as f64 / 12.0).cos())
                .collect()
        };
        let weak = modulation_index(&profile(0.1)).unwrap();
        let strong = modulation_index(&profile(0.9)).unwrap();
        assert!(weak > 0.0 && weak < strong && strong < 1.0);
    }

    #[test]
    fn test_mean_phase_vector() {
        let z = mean_phase_vector(&[0.0, PI / 2.0], &[2.0, 2.0]).unwrap();
        assert!((z.re - 1.0).abs() < 1e-12);
        assert!((z.im - 1.0).abs() < 1e-12);
        let c = mean_phase_coherence(&[0.0, PI], &[1.0, 1.0]).unwrap();
        assert!(c < 1e-12);
    }

    #[test]
    fn test_mean_phase_vector_errors() {
        assert!(matches!(
            mean_phase_vector(&[0.0], &[1.0, 2.0]),
            Err(PacError::LengthMismatch { left: 1, right: 2 })
        ));
        assert!(matches!(
            mean_phase_vector(&[], &[]),
            Err(PacError::EmptyInput)
        ));
    }

    #[test]
    fn test_binned_modulation_index() {
        let n = 1200;
        let phase: Vec<f64> = (0..n).map(|i| TAU * i as f64 / n as f64).collect();
        let flat = vec![1.0; n];
        assert!(binned_modulation_index(&phase, &flat).unwrap().abs() < 1e-6);

        let coupled: Vec<f64> = phase.iter().map(|p| 1.0 + 0.8 * p.cos()).collect();
        assert!(binned_modulation_index(&phase, &coupled).unwrap() > 0.01);
    }
}
