//! Frequency bands and evenly spaced series of bands.
//!
//! A [`FrequencyBand`] is a validated `(left, right)` pair in Hz. A
//! [`FilterSeries`] sweeps a band of fixed width across a frequency range and
//! is what a comodulogram uses for each of its two axes.
//!
//! # Example
//!
//! ```rust
//! use phac_analysis::filterbank::FilterSeries;
//!
//! // Bands 4 Hz wide, centred every 1 Hz from 4 Hz up to (excluding) 10 Hz.
//! let series = FilterSeries::new(4.0, 10.0, 4.0).unwrap();
//! assert_eq!(series.len(), 6);
//! let first = series.iter().next().unwrap();
//! assert_eq!((first.left(), first.right()), (2.0, 6.0));
//! ```

use crate::error::{PacError, Result};
use phac_core::PassBand;
use std::fmt;

/// A pass band given by its edges in Hz.
///
/// Both edges are finite, positive and strictly ordered. Whether the right
/// edge is below the Nyquist frequency depends on the signal and is checked
/// when a filter is designed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBand {
    left: f64,
    right: f64,
}

impl FrequencyBand {
    /// Creates a band from its edges.
    pub fn new(left: f64, right: f64) -> Result<Self> {
        if !(left.is_finite() && right.is_finite()) {
            return Err(PacError::InvalidBand(format!(
                "edges must be finite, got ({left}, {right})"
            )));
        }
        if left <= 0.0 {
            return Err(PacError::InvalidBand(format!(
                "left edge must be positive, got {left}"
            )));
        }
        if left >= right {
            return Err(PacError::InvalidBand(format!(
                "edges out of order: {left} >= {right}"
            )));
        }
        Ok(Self { left, right })
    }

    /// Lower edge in Hz.
    pub fn left(&self) -> f64 {
        self.left
    }

    /// Upper edge in Hz.
    pub fn right(&self) -> f64 {
        self.right
    }

    /// Width in Hz.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Arithmetic centre in Hz.
    pub fn center(&self) -> f64 {
        0.5 * (self.left + self.right)
    }
}

impl fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} Hz", self.left, self.right)
    }
}

impl From<FrequencyBand> for PassBand {
    fn from(band: FrequencyBand) -> Self {
        PassBand::Bandpass {
            low_hz: band.left,
            high_hz: band.right,
        }
    }
}

impl From<&FrequencyBand> for PassBand {
    fn from(band: &FrequencyBand) -> Self {
        PassBand::from(*band)
    }
}

/// Largest number of bands a [`FilterSeries`] may hold.
pub const MAX_SERIES_BANDS: usize = 10_000;

/// Bands of equal width with centres from `min` (inclusive) to `max`
/// (exclusive) in steps of a quarter of the width.
///
/// Band `k` is centred at `min + k * width / 4` and spans half the width on
/// either side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSeries {
    min: f64,
    max: f64,
    width: f64,
}

impl FilterSeries {
    /// Creates a series, rejecting ranges whose first band would reach down
    /// to 0 Hz or that hold more than [`MAX_SERIES_BANDS`] bands.
    pub fn new(min: f64, max: f64, width: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite() && width.is_finite()) {
            return Err(PacError::InvalidBand(format!(
                "series parameters must be finite, got min {min}, max {max}, width {width}"
            )));
        }
        if width <= 0.0 {
            return Err(PacError::InvalidBand(format!("width must be positive, got {width}")));
        }
        if max <= min {
            return Err(PacError::InvalidBand(format!(
                "series range out of order: {min} >= {max}"
            )));
        }
        if min - width / 2.0 <= 0.0 {
            return Err(PacError::InvalidBand(format!(
                "first band would start at {} Hz",
                min - width / 2.0
            )));
        }
        let bands = ((max - min) / (width / 4.0)).ceil();
        if bands > MAX_SERIES_BANDS as f64 {
            return Err(PacError::InvalidBand(format!(
                "series {min}..{max} Hz at width {width} Hz holds {bands} bands, limit is {MAX_SERIES_BANDS}"
            )));
        }
        Ok(Self { min, max, width })
    }

    /// Builds the series matching an equally spaced list of centres.
    ///
    /// The width is twice the spacing, so the series steps at half the list
    /// spacing and holds about twice as many bands as the list has entries.
    pub fn from_equidistant_list(centers: &[f64]) -> Result<Self> {
        match centers {
            [first, second, .., last] => Self::new(*first, *last, 2.0 * (second - first)),
            [first, second] => Self::new(*first, *second, 2.0 * (second - first)),
            _ => Err(PacError::InvalidBand(
                "need at least two centre frequencies".to_string(),
            )),
        }
    }

    /// Lowest band centre in Hz.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound (exclusive) on band centres in Hz.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Width of every band in Hz.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Distance between consecutive band centres.
    pub fn step(&self) -> f64 {
        self.width / 4.0
    }

    /// Number of bands.
    pub fn len(&self) -> usize {
        // Same count as an arange over [min, max) with this step.
        ((self.max - self.min) / self.step()).ceil() as usize
    }

    /// Always `false`: a valid series holds at least one band.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Centre frequencies in order.
    pub fn centers(&self) -> Vec<f64> {
        self.iter().map(|band| band.center()).collect()
    }

    /// Iterates over the bands in increasing order.
    pub fn iter(&self) -> FilterSeriesIter {
        FilterSeriesIter {
            series: *self,
            index: 0,
            len: self.len(),
        }
    }
}

impl IntoIterator for &FilterSeries {
    type Item = FrequencyBand;
    type IntoIter = FilterSeriesIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the bands of a [`FilterSeries`].
#[derive(Debug, Clone)]
pub struct FilterSeriesIter {
    series: FilterSeries,
    index: usize,
    len: usize,
}

impl Iterator for FilterSeriesIter {
    type Item = FrequencyBand;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let half = self.series.width / 2.0;
        let center = self.series.min + self.index as f64 * self.series.step();
        self.index += 1;
        // The constructor guarantees center - half > 0 and width > 0.
        Some(FrequencyBand {
            left: center - half,
            right: center + half,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FilterSeriesIter {}
