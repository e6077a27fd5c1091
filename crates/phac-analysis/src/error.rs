//! Error types for coupling analysis.

use phac_core::FilterError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the analysis pipeline.
///
/// Every variant is a precondition violation reported at the point where it
/// is detected; nothing is clamped or retried.
#[derive(Debug, Error)]
pub enum PacError {
    /// Band edges are malformed, unordered or outside (0, Nyquist).
    #[error("invalid band: {0}")]
    InvalidBand(String),

    /// A phase value lies outside [0, 2π).
    #[error("phase {value} at index {index} outside [0, 2π)")]
    InvalidPhase {
        /// Position of the offending value.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Values do not form a (sub-)probability distribution.
    #[error("invalid distribution: {0}")]
    InvalidDistribution(&'static str),

    /// An average amplitude fed to the modulation index is not positive.
    #[error("amplitude {value} at bin {index} must be strictly positive")]
    InvalidAmplitude {
        /// Bin of the offending value.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Segment and overlap lengths are inconsistent.
    #[error("invalid segmentation (segment {nsegment}, overlap {noverlap}): {reason}")]
    InvalidSegmentation {
        /// Requested segment length.
        nsegment: usize,
        /// Requested overlap length.
        noverlap: usize,
        /// Which constraint was violated.
        reason: &'static str,
    },

    /// Unknown option or inconsistent setting.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Sampling rate is not a finite positive number.
    #[error("invalid sampling rate {0} Hz: must be finite and positive")]
    InvalidSamplingRate(f64),

    /// Two arrays that must pair up element-wise differ in length.
    #[error("length mismatch: {left} vs {right} samples")]
    LengthMismatch {
        /// Length of the first array.
        left: usize,
        /// Length of the second array.
        right: usize,
    },

    /// An operation that averages over samples received none.
    #[error("input is empty")]
    EmptyInput,

    /// No sample fell into a phase bin, so its median is undefined.
    #[error("phase bin {0} is empty")]
    EmptyPhaseBin(usize),

    /// The max-envelope method found no interior local maximum.
    #[error("signal has no interior local maximum to build an envelope from")]
    NoLocalMaxima,

    /// Filtering failed for a reason other than a malformed band.
    #[error("filtering failed: {0}")]
    Filter(FilterError),

    /// Failed to read a configuration file.
    #[error("failed to read config '{path}': {source}")]
    ReadConfig {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseConfig(#[from] toml::de::Error),

    /// Failed to serialize configuration to TOML.
    #[error("failed to serialize config: {0}")]
    SerializeConfig(#[from] toml::ser::Error),
}

impl From<FilterError> for PacError {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::InvalidSampleRate(rate) => PacError::InvalidSamplingRate(rate),
            err if err.is_band_error() => PacError::InvalidBand(err.to_string()),
            err => PacError::Filter(err),
        }
    }
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, PacError>;
