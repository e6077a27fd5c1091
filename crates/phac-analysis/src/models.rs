//! Synthetic test signals with known coupling.
//!
//! Generators take the random number generator as an argument so a seeded
//! [`StdRng`](rand::rngs::StdRng) makes every signal reproducible.
//!
//! # Example
//!
//! ```rust
//! use phac_analysis::models::{SinWithNoise, sin_with_noise};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let sr = 256.0;
//! let t: Vec<f64> = (0..2560).map(|i| i as f64 / sr).collect();
//! let params = SinWithNoise { coupling: 0.9, ..SinWithNoise::default() };
//! let mut rng = StdRng::seed_from_u64(42);
//! let x = sin_with_noise(&t, &params, &mut rng).unwrap();
//! assert_eq!(x.len(), t.len());
//! ```

use crate::error::{PacError, Result};
use phac_core::{ButterworthDesign, PassBand, filtfilt};
use rand::Rng;
use rand_distr::StandardNormal;
use std::f64::consts::TAU;

/// Parameters of [`sin_with_noise`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinWithNoise {
    /// Mean frequency of the slow sinusoid in Hz.
    pub frequency: f64,
    /// Strength of the random phase walk (wave-to-wave frequency jitter).
    pub dphi: f64,
    /// Band of the modulated noise.
    pub band: PassBand,
    /// Amplitude of the modulated noise.
    pub amplitude: f64,
    /// Fraction of the noise that follows the slow rhythm, in [0, 1].
    pub coupling: f64,
}

impl Default for SinWithNoise {
    fn default() -> Self {
        Self {
            frequency: 20.0,
            dphi: 3.0,
            band: PassBand::Bandpass {
                low_hz: 50.0,
                high_hz: 90.0,
            },
            amplitude: 0.5,
            coupling: 0.5,
        }
    }
}

impl SinWithNoise {
    /// Checks the parameters against the sampling rate.
    pub fn validate(&self, sampling_rate: f64) -> Result<()> {
        let invalid = |msg: String| Err(PacError::InvalidConfiguration(msg));
        if self.dphi.is_nan() || self.dphi >= self.frequency / 3.0 {
            return invalid(format!(
                "dphi ({}) must be below a third of the frequency ({} Hz)",
                self.dphi, self.frequency
            ));
        }
        let (low, high) = self.band.edges();
        let Some(low) = low else {
            return invalid("noise band needs a lower edge".to_string());
        };
        if let Some(high) = high {
            if low >= high {
                return invalid(format!("noise band edges out of order: {low} >= {high}"));
            }
            if high >= sampling_rate / 2.0 {
                return invalid(format!(
                    "noise band upper edge {high} Hz must be below Nyquist ({} Hz)",
                    sampling_rate / 2.0
                ));
            }
        }
        if low <= self.frequency {
            return invalid(format!(
                "noise band lower edge {low} Hz must be above the frequency ({} Hz)",
                self.frequency
            ));
        }
        if self.amplitude.is_nan() || self.amplitude < 0.0 {
            return invalid(format!("amplitude must be non-negative, got {}", self.amplitude));
        }
        if !(0.0..=1.0).contains(&self.coupling) {
            return invalid(format!("coupling must lie in [0, 1], got {}", self.coupling));
        }
        Ok(())
    }
}

/// A sinusoid with a random phase walk plus band-limited noise whose
/// amplitude follows the sinusoid.
///
/// `t` holds equally spaced sample times in seconds; the sampling rate is
/// taken from its first step. With `coupling = 0` the noise is unmodulated;
/// with `coupling = 1` it vanishes at the troughs of the sinusoid.
pub fn sin_with_noise<R: Rng + ?Sized>(t: &[f64], params: &SinWithNoise, rng: &mut R) -> Result<Vec<f64>> {
    let [t0, t1, ..] = t else {
        return Err(PacError::InvalidConfiguration(
            "need at least two time points".to_string(),
        ));
    };
    let sampling_rate = 1.0 / (t1 - t0);
    if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
        return Err(PacError::InvalidSamplingRate(sampling_rate));
    }
    params.validate(sampling_rate)?;

    let scaled_dphi = params.dphi * (1.0 / sampling_rate).sqrt();
    let mut x = random_sin(t, params.frequency, scaled_dphi, rng);
    let noise = filtered_noise(t.len(), sampling_rate, params.band, rng)?;

    let min = x.iter().copied().fold(f64::INFINITY, f64::min);
    let max = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    for (xi, ni) in x.iter_mut().zip(&noise) {
        let modulation = if range > 0.0 { (*xi - min) / range } else { 0.0 };
        *xi += (1.0 + (modulation - 1.0) * params.coupling) * params.amplitude * ni;
    }
    Ok(x)
}

/// `sin(2π f t + w)` where `w` is a Gaussian random walk with step `dphi`.
fn random_sin<R: Rng + ?Sized>(t: &[f64], frequency: f64, dphi: f64, rng: &mut R) -> Vec<f64> {
    let mut walk = 0.0;
    t.iter()
        .map(|&ti| {
            walk += dphi * rng.sample::<f64, _>(StandardNormal);
            (TAU * frequency * ti + walk).sin()
        })
        .collect()
}

/// White Gaussian noise, zero-phase filtered into `band` and scaled to unit
/// standard deviation.
fn filtered_noise<R: Rng + ?Sized>(
    n: usize,
    sampling_rate: f64,
    band: PassBand,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let white: Vec<f64> = (0..n).map(|_| rng.sample(StandardNormal)).collect();
    let design = ButterworthDesign::new(sampling_rate, band)?;
    let mut noise = filtfilt(&design, &white)?;

    let mean = noise.iter().sum::<f64>() / n as f64;
    let std = (noise.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64).sqrt();
    if std > 0.0 {
        for v in &mut noise {
            *v /= std;
        }
    }
    Ok(noise)
}

/// Sawtooth-like wave: the running sum of a jittered square wave.
///
/// Each period of length `1 / frequency` starts a pulse of length
/// `tilt / frequency`, its onset displaced by `jitter` periods times a
/// standard normal draw. The square wave has its mean removed before
/// summation, so `tilt` sets how steep the rising and falling flanks are.
pub fn triangle_wave<R: Rng + ?Sized>(
    t: &[f64],
    frequency: f64,
    jitter: f64,
    tilt: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    if !(frequency.is_finite() && frequency > 0.0) {
        return Err(PacError::InvalidConfiguration(format!(
            "frequency must be positive, got {frequency}"
        )));
    }
    let mut wave = square_wave(t, frequency, jitter, tilt, rng);
    let mut sum = 0.0;
    for v in &mut wave {
        sum += *v;
        *v = sum;
    }
    Ok(wave)
}

fn square_wave<R: Rng + ?Sized>(
    t: &[f64],
    frequency: f64,
    jitter: f64,
    tilt: f64,
    rng: &mut R,
) -> Vec<f64> {
    let mut y = vec![0.0; t.len()];
    let Some(&end) = t.last() else {
        return y;
    };
    let period = 1.0 / frequency;
    let num_periods = (end / period).ceil().max(0.0) as usize;
    for k in 0..num_periods {
        let onset = k as f64 * period + jitter * period * rng.sample::<f64, _>(StandardNormal);
        let start = t.partition_point(|&ti| ti < onset);
        let stop = t.partition_point(|&ti| ti < onset + period * tilt);
        if start < stop {
            y[start..stop].fill(1.0);
        }
    }
    let mean = y.iter().sum::<f64>() / y.len() as f64;
    for v in &mut y {
        *v -= mean;
    }
    y
}
