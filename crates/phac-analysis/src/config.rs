//! Analysis settings loaded from TOML.
//!
//! Every field has a default, so a file only needs the settings it changes:
//!
//! ```toml
//! num_bins = 18
//! envelope = "max"
//! ```

use crate::binning::PAC_NUM_BINS;
use crate::error::{PacError, Result};
use crate::segmented::{DEFAULT_OVERLAP_LEN, DEFAULT_SEGMENT_LEN, SegmentedHilbert};
use crate::signal::EnvelopeMethod;
use phac_core::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable parameters of the coupling pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Number of phase bins.
    pub num_bins: usize,
    /// Segment length of the overlap-add Hilbert transform.
    pub segment_len: usize,
    /// Overlap between consecutive segments.
    pub overlap_len: usize,
    /// Envelope extraction method.
    pub envelope: EnvelopeMethod,
    /// Capacity of the filter coefficient cache.
    pub cache_capacity: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            num_bins: PAC_NUM_BINS,
            segment_len: DEFAULT_SEGMENT_LEN,
            overlap_len: DEFAULT_OVERLAP_LEN,
            envelope: EnvelopeMethod::Hilbert,
            cache_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| PacError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: AnalysisConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks that the settings can build an analyzer.
    pub fn validate(&self) -> Result<()> {
        if self.num_bins < 2 {
            return Err(PacError::InvalidConfiguration(format!(
                "num_bins must be at least 2, got {}",
                self.num_bins
            )));
        }
        if self.cache_capacity == 0 {
            return Err(PacError::InvalidConfiguration(
                "cache_capacity must be positive".to_string(),
            ));
        }
        self.segmentation().map(|_| ())
    }

    /// The segmentation described by `segment_len` and `overlap_len`.
    pub fn segmentation(&self) -> Result<SegmentedHilbert> {
        SegmentedHilbert::new(self.segment_len, self.overlap_len)
    }
}
