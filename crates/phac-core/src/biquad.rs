//! Biquad (bi-quadratic) filter sections.
//!
//! A [`SecondOrderSection`] holds normalized coefficients and never changes once
//! designed. A [`Biquad`] pairs a section with Direct Form I state so it can be
//! run sample by sample:
//!
//! ```text
//! y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
//!                - a1*y[n-1] - a2*y[n-2]
//! ```

use num_complex::Complex64;

/// Normalized coefficients of one second-order IIR section (`a[0] == 1`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondOrderSection {
    /// Feedforward coefficients `b0, b1, b2`.
    pub b: [f64; 3],
    /// Feedback coefficients `1, a1, a2`.
    pub a: [f64; 3],
}

impl SecondOrderSection {
    /// Creates a section, normalizing all coefficients by `a[0]`.
    pub fn new(b: [f64; 3], a: [f64; 3]) -> Self {
        let a0_inv = 1.0 / a[0];
        Self {
            b: [b[0] * a0_inv, b[1] * a0_inv, b[2] * a0_inv],
            a: [1.0, a[1] * a0_inv, a[2] * a0_inv],
        }
    }

    /// Scales the feedforward coefficients by `gain`.
    pub fn scaled(self, gain: f64) -> Self {
        Self {
            b: [self.b[0] * gain, self.b[1] * gain, self.b[2] * gain],
            a: self.a,
        }
    }

    /// Gain for a constant input.
    pub fn dc_gain(&self) -> f64 {
        (self.b[0] + self.b[1] + self.b[2]) / (self.a[0] + self.a[1] + self.a[2])
    }

    /// Complex response at normalized angular frequency `omega` (rad/sample).
    pub fn response(&self, omega: f64) -> Complex64 {
        let z1 = Complex64::from_polar(1.0, -omega);
        let z2 = z1 * z1;
        let num = self.b[0] + z1 * self.b[1] + z2 * self.b[2];
        let den = self.a[0] + z1 * self.a[1] + z2 * self.a[2];
        num / den
    }
}

/// Second-order section with Direct Form I delay lines.
#[derive(Debug, Clone)]
pub struct Biquad {
    section: SecondOrderSection,

    /// Input delay line: x[n-1], x[n-2]
    x1: f64,
    x2: f64,

    /// Output delay line: y[n-1], y[n-2]
    y1: f64,
    y2: f64,
}

impl Biquad {
    /// Creates a biquad with cleared state.
    pub fn new(section: SecondOrderSection) -> Self {
        Self {
            section,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let [b0, b1, b2] = self.section.b;
        let [_, a1, a2] = self.section.a;
        let output = b0 * input + b1 * self.x1 + b2 * self.x2 - a1 * self.y1 - a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Puts the delay lines in the steady state reached after an infinitely
    /// long constant `input`, and returns the corresponding constant output.
    ///
    /// Starting a run from the settled state suppresses the start-up transient
    /// that a cleared filter would produce on a signal with a DC offset.
    pub fn settle(&mut self, input: f64) -> f64 {
        let output = input * self.section.dc_gain();
        self.x1 = input;
        self.x2 = input;
        self.y1 = output;
        self.y2 = output;
        output
    }
}
