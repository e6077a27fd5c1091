//! Phase-amplitude coupling (PAC) and comodulograms.
//!
//! Coupling between the phase of a slow rhythm and the amplitude of a fast
//! one is measured by:
//! 1. Filtering the signal into the slow band and taking its phase
//! 2. Filtering the signal into the fast band and taking its envelope
//! 3. Grouping samples into phase bins by slow phase
//! 4. Taking the median phase and median envelope of every bin
//! 5. Scoring the per-bin envelope medians with the modulation index, and
//!    their phase-weighted mean with the mean phase coherence
//!
//! A [`Comodulogram`] repeats steps 3-5 for every pair of bands of two
//! [`FilterSeries`], computing each slow phase and each fast envelope once.
//!
//! # Example
//!
//! ```rust
//! use phac_analysis::{FrequencyBand, phase_amplitude_coupling};
//! use std::f64::consts::PI;
//!
//! let sr = 256.0;
//! let signal: Vec<f64> = (0..2560)
//!     .map(|i| {
//!         let t = i as f64 / sr;
//!         let slow = (2.0 * PI * 6.0 * t).sin();
//!         let fast = (1.0 + 0.8 * slow) * (2.0 * PI * 60.0 * t).sin();
//!         slow + 0.5 * fast
//!     })
//!     .collect();
//!
//! let result = phase_amplitude_coupling(
//!     &signal,
//!     sr,
//!     FrequencyBand::new(4.0, 8.0).unwrap(),
//!     FrequencyBand::new(50.0, 70.0).unwrap(),
//! )
//! .unwrap();
//! assert!(result.modulation_index > 0.01);
//! ```

use crate::binning::{PAC_NUM_BINS, bin_medians, indices_of_binned_phase};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::filterbank::{FilterSeries, FrequencyBand};
use crate::metrics::{mean_phase_vector, modulation_index};
use crate::segmented::SegmentedHilbert;
use crate::signal::{EnvelopeMethod, Signal};
use phac_core::CoefficientCache;
use rustfft::num_complex::Complex64;
use std::sync::Arc;

/// Result of phase-amplitude coupling analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct PacResult {
    /// Modulation index in [0, 1]: 0 for a flat amplitude profile over phase.
    pub modulation_index: f64,
    /// Mean of `median envelope · e^{i·median phase}` over the phase bins.
    /// Its magnitude grows with coupling; its angle is the preferred phase.
    pub mean_phase_coherence: Complex64,
    /// Median slow-band phase of each bin.
    pub phase_medians: Vec<f64>,
    /// Median fast-band envelope of each bin.
    pub envelope_medians: Vec<f64>,
}

impl PacResult {
    /// Magnitude of the mean phase coherence.
    pub fn coherence(&self) -> f64 {
        self.mean_phase_coherence.norm()
    }

    /// Slow-band phase at which the fast amplitude peaks, in (-π, π].
    pub fn preferred_phase(&self) -> f64 {
        self.mean_phase_coherence.arg()
    }

    /// Preferred phase in degrees.
    pub fn preferred_phase_degrees(&self) -> f64 {
        self.preferred_phase().to_degrees()
    }

    /// `true` if the modulation index exceeds `threshold`.
    ///
    /// A fixed threshold is a heuristic; surrogate data gives a proper test.
    pub fn is_significant(&self, threshold: f64) -> bool {
        self.modulation_index > threshold
    }
}

/// Configurable phase-amplitude coupling analyzer.
///
/// Carries the number of phase bins, the envelope method and the
/// segmentation used for analytic signals, plus a coefficient cache shared by
/// every signal it analyses.
#[derive(Debug, Clone)]
pub struct PacAnalyzer {
    num_bins: usize,
    envelope_method: EnvelopeMethod,
    segmentation: SegmentedHilbert,
    cache: Arc<CoefficientCache>,
}

impl PacAnalyzer {
    /// Creates an analyzer with 12 phase bins, Hilbert envelopes and default
    /// segmentation.
    pub fn new() -> Self {
        Self {
            num_bins: PAC_NUM_BINS,
            envelope_method: EnvelopeMethod::Hilbert,
            segmentation: SegmentedHilbert::default(),
            cache: Arc::new(CoefficientCache::default()),
        }
    }

    /// Creates an analyzer from validated settings.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            num_bins: config.num_bins,
            envelope_method: config.envelope,
            segmentation: config.segmentation()?,
            cache: Arc::new(CoefficientCache::new(config.cache_capacity)),
        })
    }

    /// Uses `cache` for every filter design from now on.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<CoefficientCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Set the envelope method.
    pub fn set_envelope_method(&mut self, method: EnvelopeMethod) {
        self.envelope_method = method;
    }

    /// Get the envelope method.
    pub fn envelope_method(&self) -> EnvelopeMethod {
        self.envelope_method
    }

    /// Number of phase bins.
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// The shared coefficient cache.
    pub fn cache(&self) -> &Arc<CoefficientCache> {
        &self.cache
    }

    /// Wraps `samples` in a [`Signal`] using this analyzer's cache and
    /// segmentation.
    pub fn signal(&self, samples: impl Into<Vec<f64>>, sampling_rate: f64) -> Result<Signal> {
        Ok(Signal::with_cache(samples, sampling_rate, Arc::clone(&self.cache))?
            .with_segmentation(self.segmentation))
    }

    /// Coupling between the phase of `slow` and the envelope of `fast`.
    ///
    /// # Errors
    ///
    /// Band and filter errors from the signal, `EmptyPhaseBin` when a phase
    /// bin receives no samples, `InvalidAmplitude` when a bin's median
    /// envelope is zero.
    pub fn analyze(&self, signal: &Signal, slow: FrequencyBand, fast: FrequencyBand) -> Result<PacResult> {
        let phase = signal.phase(slow)?;
        let envelope = signal.envelope(fast, self.envelope_method)?;
        let bins = indices_of_binned_phase(&phase, self.num_bins)?;

        let phase_medians = bin_medians(&phase, &bins)?;
        let envelope_medians = bin_medians(&envelope, &bins)?;
        let mi = modulation_index(&envelope_medians)?;
        let coherence = mean_phase_vector(&phase_medians, &envelope_medians)?;
        tracing::debug!(%slow, %fast, modulation_index = mi, "phase-amplitude coupling");

        Ok(PacResult {
            modulation_index: mi,
            mean_phase_coherence: coherence,
            phase_medians,
            envelope_medians,
        })
    }

    /// Modulation index for every pair of bands of `slow` and `fast`.
    ///
    /// Each slow-band phase and its bins, and each fast-band envelope, is
    /// computed once and reused across the table.
    pub fn comodulogram(&self, signal: &Signal, slow: &FilterSeries, fast: &FilterSeries) -> Result<Comodulogram> {
        let slow_bins = slow
            .iter()
            .map(|band| indices_of_binned_phase(&signal.phase(band)?, self.num_bins))
            .collect::<Result<Vec<_>>>()?;
        let fast_envelopes = fast
            .iter()
            .map(|band| signal.envelope(band, self.envelope_method))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(
            slow_bands = slow_bins.len(),
            fast_bands = fast_envelopes.len(),
            "computing comodulogram"
        );

        let coupling_matrix = slow_bins
            .iter()
            .map(|bins| {
                fast_envelopes
                    .iter()
                    .map(|envelope| modulation_index(&bin_medians(envelope, bins)?))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Comodulogram {
            slow_frequencies: slow.centers(),
            fast_frequencies: fast.centers(),
            coupling_matrix,
        })
    }
}

impl Default for PacAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Coupling between the phase of `slow` and the envelope of `fast` with
/// default settings.
pub fn phase_amplitude_coupling(
    samples: &[f64],
    sampling_rate: f64,
    slow: FrequencyBand,
    fast: FrequencyBand,
) -> Result<PacResult> {
    let analyzer = PacAnalyzer::new();
    let signal = analyzer.signal(samples, sampling_rate)?;
    analyzer.analyze(&signal, slow, fast)
}

/// Comodulogram of `samples` with default settings.
pub fn comodulogram(
    samples: &[f64],
    sampling_rate: f64,
    slow: &FilterSeries,
    fast: &FilterSeries,
) -> Result<Comodulogram> {
    let analyzer = PacAnalyzer::new();
    let signal = analyzer.signal(samples, sampling_rate)?;
    analyzer.comodulogram(&signal, slow, fast)
}

/// Modulation index over a grid of (slow, fast) band centres.
#[derive(Debug, Clone, PartialEq)]
pub struct Comodulogram {
    /// Centre frequencies of the slow (phase) bands in Hz.
    pub slow_frequencies: Vec<f64>,
    /// Centre frequencies of the fast (amplitude) bands in Hz.
    pub fast_frequencies: Vec<f64>,
    /// Modulation index, indexed `[slow][fast]`.
    pub coupling_matrix: Vec<Vec<f64>>,
}

impl Comodulogram {
    /// (number of slow bands, number of fast bands).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.slow_frequencies.len(), self.fast_frequencies.len())
    }

    /// Modulation index of the pair whose centres are within 0.01 Hz of the
    /// given frequencies.
    pub fn get_coupling(&self, slow_hz: f64, fast_hz: f64) -> Option<f64> {
        let si = self.slow_frequencies.iter().position(|&f| (f - slow_hz).abs() < 0.01)?;
        let fi = self.fast_frequencies.iter().position(|&f| (f - fast_hz).abs() < 0.01)?;
        Some(self.coupling_matrix[si][fi])
    }

    /// The pair with the strongest coupling as (slow Hz, fast Hz, index).
    ///
    /// Returns `None` for an empty table.
    pub fn peak_coupling(&self) -> Option<(f64, f64, f64)> {
        self.slow_frequencies
            .iter()
            .zip(&self.coupling_matrix)
            .flat_map(|(&slow, row)| {
                self.fast_frequencies
                    .iter()
                    .zip(row)
                    .map(move |(&fast, &mi)| (slow, fast, mi))
            })
            .max_by(|a, b| a.2.total_cmp(&b.2))
    }

    /// CSV with one row per slow band and one column per fast band.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("slow_hz");
        for fast in &self.fast_frequencies {
            csv.push_str(&format!(",{fast:.2}"));
        }
        csv.push('\n');

        for (slow, row) in self.slow_frequencies.iter().zip(&self.coupling_matrix) {
            csv.push_str(&format!("{slow:.2}"));
            for mi in row {
                csv.push_str(&format!(",{mi:.6}"));
            }
            csv.push('\n');
        }
        csv
    }
}
