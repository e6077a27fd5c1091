//! phac Core - filter design and zero-phase filtering for coupling analysis
//!
//! This crate is the filtering collaborator of the `phac` analysis pipeline:
//!
//! - [`PassBand`] - Low-pass, high-pass or band-pass specification
//! - [`ButterworthDesign`] - 4th-order Butterworth filter as cascaded biquads
//! - [`filtfilt`] - Forward-backward (zero-phase) filtering with edge padding
//! - [`CoefficientCache`] - Bounded LRU cache of designs, shared via `Arc`
//! - [`Biquad`] / [`SecondOrderSection`] - The second-order building block
//!
//! # Example
//!
//! ```rust
//! use phac_core::{CoefficientCache, PassBand, filtfilt};
//!
//! let cache = CoefficientCache::default();
//! let design = cache.design(256.0, PassBand::from((15.0, 25.0))).unwrap();
//!
//! let signal: Vec<f64> = (0..1024)
//!     .map(|i| (2.0 * std::f64::consts::PI * 20.0 * i as f64 / 256.0).sin())
//!     .collect();
//! let filtered = filtfilt(&design, &signal).unwrap();
//! assert_eq!(filtered.len(), signal.len());
//! ```

pub mod biquad;
pub mod butterworth;
pub mod cache;
pub mod error;
pub mod filtfilt;

pub use biquad::{Biquad, SecondOrderSection};
pub use butterworth::{ButterworthDesign, ORDER, PassBand};
pub use cache::{CacheStats, CoefficientCache, DEFAULT_CAPACITY};
pub use error::{FilterError, Result};
pub use filtfilt::filtfilt;
