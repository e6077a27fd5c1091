//! Sampled signal with on-demand filtered, phase and envelope views.
//!
//! A [`Signal`] owns its samples and sampling rate. Every derived quantity is
//! recomputed per call from the untouched raw samples; only the time axis is
//! kept once built. Filter designs come from a [`CoefficientCache`] that can be
//! shared between signals.
//!
//! # Example
//!
//! ```rust
//! use phac_analysis::{EnvelopeMethod, FrequencyBand, Signal};
//! use std::f64::consts::PI;
//!
//! let sr = 256.0;
//! let samples: Vec<f64> = (0..2560)
//!     .map(|i| (2.0 * PI * 10.0 * i as f64 / sr).sin())
//!     .collect();
//! let signal = Signal::new(samples, sr).unwrap();
//!
//! let band = FrequencyBand::new(8.0, 12.0).unwrap();
//! let phase = signal.phase(band).unwrap();
//! let envelope = signal.envelope(band, EnvelopeMethod::Hilbert).unwrap();
//! assert_eq!(phase.len(), 2560);
//! assert!((envelope[1280] - 1.0).abs() < 0.05);
//! ```

use crate::error::{PacError, Result};
use crate::phase::wrap_phase;
use crate::resample::interp;
use crate::segmented::SegmentedHilbert;
use phac_core::{CoefficientCache, PassBand, filtfilt};
use rustfft::num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

/// How the amplitude envelope of a filtered signal is obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeMethod {
    /// Magnitude of the analytic signal.
    #[default]
    Hilbert,
    /// Linear interpolation between local maxima of the rectified signal.
    Max,
}

impl EnvelopeMethod {
    /// Lower-case name as used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvelopeMethod::Hilbert => "hilbert",
            EnvelopeMethod::Max => "max",
        }
    }
}

impl fmt::Display for EnvelopeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvelopeMethod {
    type Err = PacError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hilbert" => Ok(EnvelopeMethod::Hilbert),
            "max" => Ok(EnvelopeMethod::Max),
            other => Err(PacError::InvalidConfiguration(format!(
                "unknown envelope method '{other}' (expected 'hilbert' or 'max')"
            ))),
        }
    }
}

/// Real-valued samples at a fixed sampling rate.
#[derive(Debug)]
pub struct Signal {
    samples: Vec<f64>,
    sampling_rate: f64,
    cache: Arc<CoefficientCache>,
    segmentation: SegmentedHilbert,
    time: OnceLock<Vec<f64>>,
}

impl Signal {
    /// Wraps `samples` recorded at `sampling_rate` Hz, with a private
    /// coefficient cache and default segmentation.
    pub fn new(samples: impl Into<Vec<f64>>, sampling_rate: f64) -> Result<Self> {
        Self::with_cache(samples, sampling_rate, Arc::new(CoefficientCache::default()))
    }

    /// Wraps `samples` using a shared coefficient cache.
    pub fn with_cache(
        samples: impl Into<Vec<f64>>,
        sampling_rate: f64,
        cache: Arc<CoefficientCache>,
    ) -> Result<Self> {
        if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
            return Err(PacError::InvalidSamplingRate(sampling_rate));
        }
        Ok(Self {
            samples: samples.into(),
            sampling_rate,
            cache,
            segmentation: SegmentedHilbert::default(),
            time: OnceLock::new(),
        })
    }

    /// Replaces the segmentation used for analytic signals.
    #[must_use]
    pub fn with_segmentation(mut self, segmentation: SegmentedHilbert) -> Self {
        self.segmentation = segmentation;
        self
    }

    /// Raw samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sampling rate in Hz.
    pub fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sampling_rate
    }

    /// The coefficient cache this signal designs filters through.
    pub fn cache(&self) -> &Arc<CoefficientCache> {
        &self.cache
    }

    /// Segmentation used for analytic signals.
    pub fn segmentation(&self) -> SegmentedHilbert {
        self.segmentation
    }

    /// Sample times `i / sampling_rate` in seconds, built on first use.
    pub fn time(&self) -> &[f64] {
        self.time.get_or_init(|| {
            (0..self.samples.len())
                .map(|i| i as f64 / self.sampling_rate)
                .collect()
        })
    }

    /// Zero-phase filtered copy of the samples.
    ///
    /// # Errors
    ///
    /// `InvalidBand` for edges at or beyond Nyquist, `Filter` when the signal
    /// is too short for the filter's edge padding.
    pub fn filtered(&self, band: impl Into<PassBand>) -> Result<Vec<f64>> {
        let band = band.into();
        let design = self.cache.design(self.sampling_rate, band)?;
        tracing::trace!(?band, sampling_rate = self.sampling_rate, "filtering signal");
        Ok(filtfilt(&design, &self.samples)?)
    }

    /// Analytic signal of the filtered samples.
    pub fn analytic(&self, band: impl Into<PassBand>) -> Result<Vec<Complex64>> {
        let filtered = self.filtered(band)?;
        Ok(self.segmentation.analytic_signal(&filtered))
    }

    /// Instantaneous phase in [0, 2π) of the filtered samples.
    ///
    /// The analytic angle is shifted by π/2 so that phase zero is a rising
    /// zero crossing: for `sin(φ)` the result is `φ` wrapped.
    pub fn phase(&self, band: impl Into<PassBand>) -> Result<Vec<f64>> {
        Ok(self
            .analytic(band)?
            .iter()
            .map(|z| wrap_phase(z.arg() + FRAC_PI_2))
            .collect())
    }

    /// Amplitude envelope of the filtered samples.
    ///
    /// # Errors
    ///
    /// `NoLocalMaxima` when [`EnvelopeMethod::Max`] finds no interior peak,
    /// plus everything [`filtered`](Self::filtered) can fail with.
    pub fn envelope(&self, band: impl Into<PassBand>, method: EnvelopeMethod) -> Result<Vec<f64>> {
        match method {
            EnvelopeMethod::Hilbert => Ok(self.analytic(band)?.iter().map(|z| z.norm()).collect()),
            EnvelopeMethod::Max => max_envelope(&self.filtered(band)?),
        }
    }
}

/// Envelope through the local maxima of `|x - mean(x)|`, held constant
/// outside the first and last maximum.
fn max_envelope(filtered: &[f64]) -> Result<Vec<f64>> {
    let n = filtered.len();
    if n == 0 {
        return Err(PacError::EmptyInput);
    }
    let mean = filtered.iter().sum::<f64>() / n as f64;
    let rectified: Vec<f64> = filtered.iter().map(|x| (x - mean).abs()).collect();

    let (peak_positions, peak_values): (Vec<f64>, Vec<f64>) = rectified
        .windows(3)
        .enumerate()
        .filter(|(_, w)| w[0] < w[1] && w[2] < w[1])
        .map(|(i, w)| ((i + 1) as f64, w[1]))
        .unzip();
    if peak_positions.is_empty() {
        return Err(PacError::NoLocalMaxima);
    }

    let positions: Vec<f64> = (0..n).map(|i| i as f64).collect();
    interp(&positions, &peak_positions, &peak_values)
}
