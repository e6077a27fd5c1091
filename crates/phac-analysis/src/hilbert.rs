//! Hilbert transform for computing analytic signals.
//!
//! # Algorithm
//!
//! The transform runs over the whole input at its natural length (no padding):
//! 1. Compute the FFT of the real signal
//! 2. Double the positive-frequency bins
//! 3. Zero the negative-frequency bins
//! 4. Keep DC unchanged, and the Nyquist bin too when the length is even
//! 5. The inverse FFT is the analytic signal
//!
//! The real part of the result reproduces the input; the imaginary part is
//! the Hilbert transform of the input.
//!
//! # Example
//!
//! ```rust
//! use phac_analysis::hilbert::HilbertTransform;
//! use std::f64::consts::PI;
//!
//! let mut hilbert = HilbertTransform::new();
//! let signal: Vec<f64> = (0..1024)
//!     .map(|i| (2.0 * PI * 10.0 * i as f64 / 1024.0).cos())
//!     .collect();
//!
//! let analytic = hilbert.analytic_signal(&signal);
//! assert!((analytic[100].norm() - 1.0).abs() < 1e-9);
//! ```

use rustfft::FftPlanner;
use rustfft::num_complex::Complex64;

/// FFT-based Hilbert transform for inputs of any length.
///
/// Holds an FFT planner so repeated transforms of the same length reuse
/// their plans.
pub struct HilbertTransform {
    planner: FftPlanner<f64>,
}

impl HilbertTransform {
    /// Create a new Hilbert transform processor.
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    /// Compute the analytic signal `x + i·H{x}` of `signal`.
    ///
    /// Works for even and odd lengths; an empty input gives an empty output.
    pub fn analytic_signal(&mut self, signal: &[f64]) -> Vec<Complex64> {
        let n = signal.len();
        if n == 0 {
            return Vec::new();
        }

        let mut buffer: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();
        self.planner.plan_fft_forward(n).process(&mut buffer);

        let half = n / 2;
        // Last doubled bin: half - 1 for even n (half is Nyquist), half for odd n.
        let doubled_end = if n % 2 == 0 { half } else { half + 1 };
        for bin in &mut buffer[1..doubled_end] {
            *bin *= 2.0;
        }
        for bin in &mut buffer[half + 1..] {
            *bin = Complex64::new(0.0, 0.0);
        }

        self.planner.plan_fft_inverse(n).process(&mut buffer);
        let scale = 1.0 / n as f64;
        for z in &mut buffer {
            *z *= scale;
        }
        buffer
    }
}

impl Default for HilbertTransform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn tone(cycles: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (2.0 * PI * cycles * i as f64 / n as f64).sin())
            .collect()
    }

    #[test]
    fn test_real_part_reproduces_input() {
        let mut hilbert = HilbertTransform::new();
        for n in [1, 2, 7, 64, 101] {
            let x: Vec<f64> = (0..n).map(|i| ((i * 7 % 13) as f64) - 6.0).collect();
            let z = hilbert.analytic_signal(&x);
            assert_eq!(z.len(), n);
            for (a, b) in z.iter().zip(&x) {
                assert!((a.re - b).abs() < 1e-9, "n={n}: {} vs {b}", a.re);
            }
        }
    }

    #[test]
    fn test_sine_becomes_negative_cosine() {
        // H{sin} = -cos for a whole number of periods, even or odd length.
        let mut hilbert = HilbertTransform::new();
        for n in [256, 255] {
            let x = tone(8.0, n);
            let z = hilbert.analytic_signal(&x);
            for (i, zi) in z.iter().enumerate() {
                let expected = -(2.0 * PI * 8.0 * i as f64 / n as f64).cos();
                assert!((zi.im - expected).abs() < 1e-9, "n={n} i={i}");
                assert!((zi.norm() - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_dc_has_no_imaginary_part() {
        let mut hilbert = HilbertTransform::new();
        let z = hilbert.analytic_signal(&[3.0; 10]);
        for zi in z {
            assert!((zi.re - 3.0).abs() < 1e-12);
            assert!(zi.im.abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty_and_single_sample() {
        let mut hilbert = HilbertTransform::new();
        assert!(hilbert.analytic_signal(&[]).is_empty());
        let z = hilbert.analytic_signal(&[2.5]);
        assert_eq!(z, vec![Complex64::new(2.5, 0.0)]);
    }
}
