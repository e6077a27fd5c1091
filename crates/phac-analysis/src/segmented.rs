//! Overlap-add Hilbert transform for long recordings.
//!
//! Long inputs are cut into segments of `nsegment` samples that overlap by
//! `noverlap` samples. Each segment is transformed on its own, weighted by a
//! [`trapezoid`] window and summed into the output. Within the overlaps the
//! falling ramp of one segment and the rising ramp of the next add up to one,
//! so the result matches a single transform away from segment edges.
//!
//! The first segment keeps its leading samples at full weight. The last
//! segment gets no such treatment: when the input ends inside the falling ramp
//! of the final segment, the trailing samples come out attenuated.

use crate::error::{PacError, Result};
use crate::hilbert::HilbertTransform;
use rustfft::num_complex::Complex64;
use std::ops::Range;

/// Default segment length in samples.
pub const DEFAULT_SEGMENT_LEN: usize = 8192;

/// Default overlap between consecutive segments in samples.
pub const DEFAULT_OVERLAP_LEN: usize = 1024;

/// Trapezoidal window of length `n` with linear ramps of length `m`.
///
/// The rising ramp is `k / (m + 1)` for `k = 1..=m`, followed by `n - 2m`
/// ones and the rising ramp reversed. Ramps shifted by `n - m` samples sum to
/// exactly one.
///
/// Requires `m > 0` and `n > 2m`.
pub fn trapezoid(n: usize, m: usize) -> Result<Vec<f64>> {
    check_lengths(n, m)?;
    Ok(ramp_window(n, m))
}

fn check_lengths(nsegment: usize, noverlap: usize) -> Result<()> {
    let reason = if nsegment == 0 {
        "segment length must be positive"
    } else if noverlap == 0 {
        "overlap must be positive"
    } else if 2 * noverlap >= nsegment {
        "segment must be longer than twice the overlap"
    } else {
        return Ok(());
    };
    Err(PacError::InvalidSegmentation {
        nsegment,
        noverlap,
        reason,
    })
}

fn ramp_window(n: usize, m: usize) -> Vec<f64> {
    let step = 1.0 / (m + 1) as f64;
    let rise = (1..=m).map(|k| k as f64 * step);
    let fall = (1..=m).rev().map(|k| k as f64 * step);
    rise.chain(std::iter::repeat_n(1.0, n - 2 * m)).chain(fall).collect()
}

/// Segment and overlap lengths for the overlap-add Hilbert transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentedHilbert {
    nsegment: usize,
    noverlap: usize,
}

impl SegmentedHilbert {
    /// Creates a segmentation, checking that the overlap is positive and
    /// that `nsegment > 2 * noverlap`.
    pub fn new(nsegment: usize, noverlap: usize) -> Result<Self> {
        check_lengths(nsegment, noverlap)?;
        Ok(Self { nsegment, noverlap })
    }

    /// Segment length in samples.
    pub fn nsegment(&self) -> usize {
        self.nsegment
    }

    /// Overlap length in samples.
    pub fn noverlap(&self) -> usize {
        self.noverlap
    }

    /// Distance between the starts of consecutive segments.
    pub fn hop(&self) -> usize {
        self.nsegment - self.noverlap
    }

    /// Number of segments covering `len` samples.
    pub fn num_segments(&self, len: usize) -> usize {
        len.div_ceil(self.hop())
    }

    /// Sample range of segment `index`, clipped to `len`.
    pub fn segment_range(&self, index: usize, len: usize) -> Range<usize> {
        let start = (index * self.hop()).min(len);
        let end = (start + self.nsegment).min(len);
        start..end
    }

    /// Computes the analytic signal of `signal`.
    ///
    /// Inputs shorter than one segment go through a single direct transform.
    pub fn analytic_signal(&self, signal: &[f64]) -> Vec<Complex64> {
        let mut hilbert = HilbertTransform::new();
        let len = signal.len();
        if len < self.nsegment {
            return hilbert.analytic_signal(signal);
        }

        let window = ramp_window(self.nsegment, self.noverlap);
        let mut output = vec![Complex64::new(0.0, 0.0); len];
        let num_segments = self.num_segments(len);
        tracing::debug!(
            len,
            num_segments,
            nsegment = self.nsegment,
            noverlap = self.noverlap,
            "segmented hilbert transform"
        );

        for index in 0..num_segments {
            let range = self.segment_range(index, len);
            let block = hilbert.analytic_signal(&signal[range.clone()]);
            let full_weight = if index == 0 { self.noverlap } else { 0 };
            for (i, (out, z)) in output[range].iter_mut().zip(block).enumerate() {
                let weight = if i < full_weight { 1.0 } else { window[i] };
                *out += z * weight;
            }
        }
        output
    }
}

impl Default for SegmentedHilbert {
    fn default() -> Self {
        Self {
            nsegment: DEFAULT_SEGMENT_LEN,
            noverlap: DEFAULT_OVERLAP_LEN,
        }
    }
}
