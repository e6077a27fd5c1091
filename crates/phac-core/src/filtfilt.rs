//! Zero-phase (forward-backward) filtering.
//!
//! The signal is extended at both ends by repeating its edge samples
//! (constant padding), run forward through the cascade, reversed, run through
//! the cascade again and reversed back. Phase shifts of the two passes cancel
//! and the magnitude response is squared.
//!
//! Each pass starts with every biquad settled to the steady state of its first
//! input sample, so a DC offset produces no start-up transient.

use crate::biquad::{Biquad, SecondOrderSection};
use crate::butterworth::ButterworthDesign;
use crate::error::{FilterError, Result};
use std::iter::repeat_n;

/// Applies `design` forwards and backwards to `signal`.
///
/// The output has the same length as the input. Signals must be longer than
/// [`ButterworthDesign::padding_len`].
///
/// # Example
///
/// ```rust
/// use phac_core::{ButterworthDesign, PassBand, filtfilt};
///
/// let design = ButterworthDesign::new(128.0, PassBand::Lowpass { cutoff_hz: 10.0 }).unwrap();
/// let smoothed = filtfilt(&design, &vec![1.0; 256]).unwrap();
/// assert!(smoothed.iter().all(|&x| (x - 1.0).abs() < 1e-9));
/// ```
pub fn filtfilt(design: &ButterworthDesign, signal: &[f64]) -> Result<Vec<f64>> {
    let padding = design.padding_len();
    let len = signal.len();
    if len <= padding {
        return Err(FilterError::SignalTooShort { len, padding });
    }

    let mut extended = Vec::with_capacity(len + 2 * padding);
    extended.extend(repeat_n(signal[0], padding));
    extended.extend_from_slice(signal);
    extended.extend(repeat_n(signal[len - 1], padding));

    let mut forward = run_cascade(design.sections(), &extended);
    forward.reverse();
    let mut backward = run_cascade(design.sections(), &forward);
    backward.reverse();

    backward.truncate(padding + len);
    backward.drain(..padding);
    Ok(backward)
}

/// Runs `input` once through the cascade, starting from the steady state of
/// `input[0]`.
fn run_cascade(sections: &[SecondOrderSection], input: &[f64]) -> Vec<f64> {
    let mut stages: Vec<Biquad> = sections.iter().copied().map(Biquad::new).collect();
    if let Some(&first) = input.first() {
        stages.iter_mut().fold(first, |level, stage| stage.settle(level));
    }
    input
        .iter()
        .map(|&x| stages.iter_mut().fold(x, |acc, stage| stage.process(acc)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::butterworth::PassBand;
    use std::f64::consts::PI;

    fn sine(freq: f64, sr: f64, n: usize) -> Vec<f64> {
        (0..n).map(|i| (2.0 * PI * freq * i as f64 / sr).sin()).collect()
    }

    #[test]
    fn test_too_short_signal() {
        let design = ButterworthDesign::new(128.0, PassBand::from((5.0, 15.0))).unwrap();
        let err = filtfilt(&design, &[0.0; 27]).unwrap_err();
        assert_eq!(err, FilterError::SignalTooShort { len: 27, padding: 27 });
        assert!(filtfilt(&design, &[0.0; 28]).is_ok());
    }

    #[test]
    fn test_preserves_length() {
        let design = ButterworthDesign::new(100.0, PassBand::Highpass { cutoff_hz: 5.0 }).unwrap();
        let x = sine(10.0, 100.0, 333);
        assert_eq!(filtfilt(&design, &x).unwrap().len(), 333);
    }

    #[test]
    fn test_lowpass_passes_dc_offset() {
        let design = ButterworthDesign::new(128.0, PassBand::Lowpass { cutoff_hz: 10.0 }).unwrap();
        let y = filtfilt(&design, &vec![-2.5; 200]).unwrap();
        for (i, v) in y.iter().enumerate() {
            assert!((v + 2.5).abs() < 1e-9, "sample {i}: {v}");
        }
    }

    #[test]
    fn test_zero_phase_in_passband() {
        // A tone in the passband comes out with no phase shift and ~unit gain.
        let sr = 512.0;
        let design = ButterworthDesign::new(sr, PassBand::from((30.0, 60.0))).unwrap();
        let x = sine(42.0, sr, 4096);
        let y = filtfilt(&design, &x).unwrap();
        let gain = design.frequency_response(42.0).norm_sqr();
        for i in 512..3584 {
            assert!(
                (y[i] - gain * x[i]).abs() < 1e-2,
                "sample {i}: {} vs {}",
                y[i],
                gain * x[i]
            );
        }
    }

    #[test]
    fn test_stopband_attenuated() {
        let sr = 256.0;
        let design = ButterworthDesign::new(sr, PassBand::from((15.0, 25.0))).unwrap();
        let x = sine(90.0, sr, 2048);
        let y = filtfilt(&design, &x).unwrap();
        let peak = y[256..1792].iter().fold(0.0f64, |m, v| m.max(v.abs()));
        assert!(peak < 1e-3, "stopband tone leaked through: {peak}");
    }
}
