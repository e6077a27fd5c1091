//! 4th-order Butterworth filter design as cascaded second-order sections.
//!
//! # Algorithm
//!
//! The design follows the classic analog-prototype route:
//! 1. Butterworth prototype poles on the unit circle (no zeros, unit gain)
//! 2. Pre-warp the band edges for the bilinear transform
//! 3. Frequency transform: low-pass → low-pass, high-pass or band-pass
//! 4. Bilinear transform to the z-plane
//! 5. Group conjugate pole pairs and real zero pairs into biquads
//!
//! A band-pass built this way has order 8 (two poles per prototype pole) and
//! unit gain at the geometric centre of its pre-warped edges.

use crate::biquad::SecondOrderSection;
use crate::error::{FilterError, Result};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Order of the analog prototype.
pub const ORDER: usize = 4;

/// Which part of the spectrum a filter passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PassBand {
    /// Pass everything below `cutoff_hz`.
    Lowpass {
        /// Cutoff frequency in Hz.
        cutoff_hz: f64,
    },
    /// Pass everything above `cutoff_hz`.
    Highpass {
        /// Cutoff frequency in Hz.
        cutoff_hz: f64,
    },
    /// Pass `low_hz..high_hz`.
    Bandpass {
        /// Lower edge in Hz.
        low_hz: f64,
        /// Upper edge in Hz.
        high_hz: f64,
    },
}

impl PassBand {
    /// Builds a band from optional edges: only `high` gives a low-pass, only
    /// `low` a high-pass, both a band-pass.
    pub fn from_edges(low: Option<f64>, high: Option<f64>) -> Result<Self> {
        match (low, high) {
            (None, None) => Err(FilterError::NoEdges),
            (None, Some(cutoff_hz)) => Ok(PassBand::Lowpass { cutoff_hz }),
            (Some(cutoff_hz), None) => Ok(PassBand::Highpass { cutoff_hz }),
            (Some(low_hz), Some(high_hz)) => Ok(PassBand::Bandpass { low_hz, high_hz }),
        }
    }

    /// The (low, high) edges, `None` where the band is open.
    pub fn edges(&self) -> (Option<f64>, Option<f64>) {
        match *self {
            PassBand::Lowpass { cutoff_hz } => (None, Some(cutoff_hz)),
            PassBand::Highpass { cutoff_hz } => (Some(cutoff_hz), None),
            PassBand::Bandpass { low_hz, high_hz } => (Some(low_hz), Some(high_hz)),
        }
    }

    /// Checks that every edge lies in (0, Nyquist) and that band-pass edges
    /// are strictly increasing.
    pub fn validate(&self, sample_rate: f64) -> Result<()> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(FilterError::InvalidSampleRate(sample_rate));
        }
        let nyquist = sample_rate / 2.0;
        let (low, high) = self.edges();
        for edge in low.into_iter().chain(high) {
            if !(edge > 0.0 && edge < nyquist) {
                return Err(FilterError::EdgeOutOfRange { edge, nyquist });
            }
        }
        if let (Some(low), Some(high)) = (low, high) {
            if low >= high {
                return Err(FilterError::UnorderedEdges { low, high });
            }
        }
        Ok(())
    }
}

impl From<(f64, f64)> for PassBand {
    fn from((low_hz, high_hz): (f64, f64)) -> Self {
        PassBand::Bandpass { low_hz, high_hz }
    }
}

/// A designed 4th-order Butterworth filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ButterworthDesign {
    band: PassBand,
    sample_rate: f64,
    sections: Vec<SecondOrderSection>,
}

impl ButterworthDesign {
    /// Designs the filter for `band` at `sample_rate`.
    pub fn new(sample_rate: f64, band: PassBand) -> Result<Self> {
        band.validate(sample_rate)?;

        let prototype = prototype_poles(ORDER);
        let warp = |f: f64| 4.0 * (PI * f / sample_rate).tan();

        let (zeros, poles, gain) = match band {
            PassBand::Lowpass { cutoff_hz } => lowpass_to_lowpass(&prototype, warp(cutoff_hz)),
            PassBand::Highpass { cutoff_hz } => lowpass_to_highpass(&prototype, warp(cutoff_hz)),
            PassBand::Bandpass { low_hz, high_hz } => {
                lowpass_to_bandpass(&prototype, warp(low_hz), warp(high_hz))
            }
        };
        let (zeros, poles, gain) = bilinear(&zeros, &poles, gain);
        let sections = to_sections(&zeros, &poles, gain);

        #[cfg(feature = "tracing")]
        tracing::trace!(?band, sample_rate, sections = sections.len(), "butterworth design");

        Ok(Self {
            band,
            sample_rate,
            sections,
        })
    }

    /// The band this filter passes.
    pub fn band(&self) -> PassBand {
        self.band
    }

    /// The sampling rate the filter was designed for.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Cascaded second-order sections; the overall gain lives in the first.
    pub fn sections(&self) -> &[SecondOrderSection] {
        &self.sections
    }

    /// Number of edge samples padded on each side by zero-phase filtering.
    ///
    /// Three times the number of taps of the equivalent transfer function.
    pub fn padding_len(&self) -> usize {
        3 * (2 * self.sections.len() + 1)
    }

    /// Complex response of the whole cascade at `frequency_hz`.
    pub fn frequency_response(&self, frequency_hz: f64) -> Complex64 {
        let omega = 2.0 * PI * frequency_hz / self.sample_rate;
        self.sections
            .iter()
            .fold(Complex64::new(1.0, 0.0), |acc, s| acc * s.response(omega))
    }
}

type Zpk = (Vec<Complex64>, Vec<Complex64>, f64);

/// Poles of the analog Butterworth prototype with unit cutoff.
fn prototype_poles(order: usize) -> Vec<Complex64> {
    (0..order)
        .map(|k| {
            let m = (2 * k) as f64 - (order - 1) as f64;
            -Complex64::from_polar(1.0, PI * m / (2.0 * order as f64))
        })
        .collect()
}

fn lowpass_to_lowpass(prototype: &[Complex64], wo: f64) -> Zpk {
    let poles: Vec<Complex64> = prototype.iter().map(|&p| p * wo).collect();
    let gain = wo.powi(prototype.len() as i32);
    (Vec::new(), poles, gain)
}

fn lowpass_to_highpass(prototype: &[Complex64], wo: f64) -> Zpk {
    let poles: Vec<Complex64> = prototype.iter().map(|&p| wo / p).collect();
    let zeros = vec![Complex64::new(0.0, 0.0); prototype.len()];
    let denom: Complex64 = prototype.iter().map(|&p| -p).product();
    (zeros, poles, (1.0 / denom).re)
}

fn lowpass_to_bandpass(prototype: &[Complex64], w_low: f64, w_high: f64) -> Zpk {
    let bw = w_high - w_low;
    let wo2 = w_low * w_high;
    let mut poles = Vec::with_capacity(2 * prototype.len());
    for &p in prototype {
        let p_lp = p * (bw / 2.0);
        let offset = (p_lp * p_lp - wo2).sqrt();
        poles.push(p_lp + offset);
        poles.push(p_lp - offset);
    }
    let zeros = vec![Complex64::new(0.0, 0.0); prototype.len()];
    (zeros, poles, bw.powi(prototype.len() as i32))
}

/// Bilinear transform with the sampling rate normalized to 2.
fn bilinear(zeros: &[Complex64], poles: &[Complex64], gain: f64) -> Zpk {
    let fs2 = Complex64::new(4.0, 0.0);
    let map = |&s: &Complex64| (fs2 + s) / (fs2 - s);

    let mut z: Vec<Complex64> = zeros.iter().map(map).collect();
    let p: Vec<Complex64> = poles.iter().map(map).collect();
    // zeros at infinity land on Nyquist
    z.resize(p.len(), Complex64::new(-1.0, 0.0));

    let num: Complex64 = zeros.iter().map(|&s| fs2 - s).product();
    let den: Complex64 = poles.iter().map(|&s| fs2 - s).product();
    (z, p, gain * (num / den).re)
}

fn to_sections(zeros: &[Complex64], poles: &[Complex64], gain: f64) -> Vec<SecondOrderSection> {
    // Denominators from conjugate pole pairs, real poles paired up in order.
    let tol = 1e-12;
    let mut denominators: Vec<[f64; 3]> = poles
        .iter()
        .filter(|p| p.im > tol * p.norm().max(1.0))
        .map(|p| [1.0, -2.0 * p.re, p.norm_sqr()])
        .collect();
    let real_poles: Vec<f64> = poles
        .iter()
        .filter(|p| p.im.abs() <= tol * p.norm().max(1.0))
        .map(|p| p.re)
        .collect();
    for pair in real_poles.chunks(2) {
        denominators.push(match *pair {
            [r1, r2] => [1.0, -(r1 + r2), r1 * r2],
            [r] => [1.0, -r, 0.0],
            _ => unreachable!("chunks(2) yields one or two poles"),
        });
    }

    // Digital zeros are all real (at +1 or -1); pairing smallest with largest
    // gives band-pass sections one zero at each end of the spectrum.
    let mut real_zeros: Vec<f64> = zeros.iter().map(|z| z.re).collect();
    real_zeros.sort_by(f64::total_cmp);
    let n = real_zeros.len();
    let numerators = (0..n / 2).map(|i| {
        let (z1, z2) = (real_zeros[i], real_zeros[n - 1 - i]);
        [1.0, -(z1 + z2), z1 * z2]
    });

    denominators
        .into_iter()
        .zip(numerators)
        .enumerate()
        .map(|(i, (a, b))| {
            let section = SecondOrderSection::new(b, a);
            if i == 0 { section.scaled(gain) } else { section }
        })
        .collect()
}
