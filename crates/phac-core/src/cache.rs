//! Bounded least-recently-used cache of filter designs.
//!
//! Designing a filter is cheap but not free, and analysis code asks for the
//! same (sampling rate, band) pair over and over: once per derived signal and
//! once per cell of a comodulogram. The cache is an explicit object so callers
//! decide its lifetime and share it with [`Arc`].

use crate::butterworth::{ButterworthDesign, PassBand};
use crate::error::Result;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Default number of designs kept before the least recently used is evicted.
pub const DEFAULT_CAPACITY: usize = 128;

/// Bit-exact key for a (sampling rate, band) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    sample_rate: u64,
    low: Option<u64>,
    high: Option<u64>,
}

impl CacheKey {
    fn new(sample_rate: f64, band: PassBand) -> Self {
        let (low, high) = band.edges();
        Self {
            sample_rate: sample_rate.to_bits(),
            low: low.map(f64::to_bits),
            high: high.map(f64::to_bits),
        }
    }
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that designed a new filter.
    pub misses: u64,
}

#[derive(Debug)]
struct CacheState {
    entries: LruCache<CacheKey, Arc<ButterworthDesign>>,
    stats: CacheStats,
}

/// Thread-safe bounded LRU cache mapping (sampling rate, band) to designs.
#[derive(Debug)]
pub struct CoefficientCache {
    state: Mutex<CacheState>,
}

impl CoefficientCache {
    /// Creates a cache holding at most `capacity` designs (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            state: Mutex::new(CacheState {
                entries: LruCache::new(capacity),
                stats: CacheStats::default(),
            }),
        }
    }

    /// Maximum number of designs held.
    pub fn capacity(&self) -> usize {
        self.state.lock().entries.cap().get()
    }

    /// Number of designs currently held.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hit/miss counters since creation or the last [`clear`](Self::clear).
    pub fn stats(&self) -> CacheStats {
        self.state.lock().stats
    }

    /// Drops every cached design and resets the counters.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.stats = CacheStats::default();
    }

    /// Returns the design for `band` at `sample_rate`, designing and caching
    /// it on first use. Invalid bands are never cached.
    pub fn design(&self, sample_rate: f64, band: PassBand) -> Result<Arc<ButterworthDesign>> {
        let key = CacheKey::new(sample_rate, band);
        let mut state = self.state.lock();

        if let Some(design) = state.entries.get(&key).map(Arc::clone) {
            state.stats.hits += 1;
            return Ok(design);
        }

        let design = Arc::new(ButterworthDesign::new(sample_rate, band)?);
        state.stats.misses += 1;

        let evicted = state.entries.push(key, Arc::clone(&design));
        #[cfg(feature = "tracing")]
        if evicted.is_some() {
            tracing::trace!(
                capacity = state.entries.cap().get(),
                "coefficient cache evicted least recently used design"
            );
        }
        #[cfg(not(feature = "tracing"))]
        let _ = evicted;
        Ok(design)
    }
}

impl Default for CoefficientCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
