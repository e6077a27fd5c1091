//! phac Analysis - phase-amplitude coupling for neural and physiological signals
//!
//! This crate measures how the phase of a slow rhythm modulates the amplitude
//! of a faster one:
//!
//! - [`hilbert`] - FFT-based analytic signal for any input length
//! - [`segmented`] - Overlap-add Hilbert transform for long recordings
//! - [`filterbank`] - Frequency bands and evenly spaced band series
//! - [`signal`] - Signal facade: filtered, phase and envelope views
//! - [`binning`] - Grouping of samples into phase bins
//! - [`metrics`] - Modulation index, Shannon entropy, mean phase coherence
//! - [`cfc`] - Phase-amplitude coupling and comodulograms
//! - [`resample`] - Linear interpolation and anti-aliased downsampling
//! - [`phase`] - Phase wrapping and phase differences
//! - [`models`] - Synthetic signals with known coupling
//! - [`config`] - Analysis settings from TOML
//!
//! Filter design and zero-phase filtering live in `phac-core`.
//!
//! ## Example Workflow
//!
//! ```rust,no_run
//! use phac_analysis::{FilterSeries, FrequencyBand, PacAnalyzer};
//!
//! let samples: Vec<f64> = vec![0.0; 10_000]; // your recording
//! let analyzer = PacAnalyzer::new();
//! let signal = analyzer.signal(samples, 1000.0).unwrap();
//!
//! // 1. Single band pair
//! let theta = FrequencyBand::new(4.0, 8.0).unwrap();
//! let gamma = FrequencyBand::new(30.0, 50.0).unwrap();
//! let result = analyzer.analyze(&signal, theta, gamma).unwrap();
//! println!("MI: {:.4}, preferred phase {:.1}°", result.modulation_index, result.preferred_phase_degrees());
//!
//! // 2. Sweep both axes
//! let slow = FilterSeries::new(4.0, 12.0, 2.0).unwrap();
//! let fast = FilterSeries::new(30.0, 90.0, 20.0).unwrap();
//! let como = analyzer.comodulogram(&signal, &slow, &fast).unwrap();
//! print!("{}", como.to_csv());
//! ```

pub mod binning;
pub mod cfc;
pub mod config;
pub mod error;
pub mod filterbank;
pub mod hilbert;
pub mod metrics;
pub mod models;
pub mod phase;
pub mod resample;
pub mod segmented;
pub mod signal;

// Re-export main types
pub use binning::{DEFAULT_NUM_BINS, PAC_NUM_BINS, indices_of_binned_phase};
pub use cfc::{Comodulogram, PacAnalyzer, PacResult, comodulogram, phase_amplitude_coupling};
pub use config::AnalysisConfig;
pub use error::{PacError, Result};
pub use filterbank::{FilterSeries, FrequencyBand, MAX_SERIES_BANDS};
pub use hilbert::HilbertTransform;
pub use metrics::{
    binned_modulation_index, mean_phase_coherence, mean_phase_vector, modulation_index, normalize,
    shannon_entropy,
};
pub use phase::phase_difference;
pub use resample::downsample;
pub use segmented::{SegmentedHilbert, trapezoid};
pub use signal::{EnvelopeMethod, Signal};
