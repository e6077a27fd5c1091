//! Error types for filter design and application.

use thiserror::Error;

/// Errors that can occur while designing or applying a filter.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    /// Sampling rate is not a finite positive number.
    #[error("invalid sampling rate {0} Hz: must be finite and positive")]
    InvalidSampleRate(f64),

    /// A band edge lies outside the open interval (0, Nyquist).
    #[error("band edge {edge} Hz outside (0, {nyquist}) Hz")]
    EdgeOutOfRange {
        /// The offending edge frequency.
        edge: f64,
        /// Nyquist frequency of the sampling rate in use.
        nyquist: f64,
    },

    /// Band-pass edges are not strictly increasing.
    #[error("band edges out of order: low {low} Hz must be below high {high} Hz")]
    UnorderedEdges {
        /// Lower edge in Hz.
        low: f64,
        /// Upper edge in Hz.
        high: f64,
    },

    /// Neither a low nor a high edge was given.
    #[error("band needs at least one edge")]
    NoEdges,

    /// Signal is not longer than the edge padding used by zero-phase filtering.
    #[error("signal of {len} samples too short for zero-phase filtering (needs more than {padding})")]
    SignalTooShort {
        /// Length of the rejected signal.
        len: usize,
        /// Number of padding samples per edge.
        padding: usize,
    },
}

impl FilterError {
    /// Returns `true` when the error describes a malformed band rather than a
    /// problem with the signal or the sampling rate.
    pub fn is_band_error(&self) -> bool {
        matches!(
            self,
            FilterError::EdgeOutOfRange { .. } | FilterError::UnorderedEdges { .. } | FilterError::NoEdges
        )
    }
}

/// Result type for filter operations.
pub type Result<T> = core::result::Result<T, FilterError>;
