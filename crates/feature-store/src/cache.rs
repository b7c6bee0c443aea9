//! Bounded LRU Feature Cache

use crate::{FeatureError, FeatureSeries, OnDemandExtractor, Signal};
use linked_hash_map::LinkedHashMap;
use std::sync::Arc;
use tracing::debug;

/// Default number of whole-signal feature series kept in memory
pub const DEFAULT_CACHE_CAPACITY: usize = 12;

/// LRU cache of whole-signal feature series, keyed by signal identifier
///
/// Trades bounded memory against repeated whole-signal extraction. Recency
/// bookkeeping requires exclusive access; the owning pipeline enforces the
/// single-user discipline through `&mut self`.
pub struct FeatureCache {
    entries: LinkedHashMap<String, Arc<FeatureSeries>>,
    capacity: usize,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl FeatureCache {
    /// Create a cache holding up to `capacity` feature series
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LinkedHashMap::new(),
            capacity,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Cached series for `signal`, extracting and inserting on miss
    ///
    /// A hit refreshes recency. A failed extraction is propagated as-is and
    /// nothing is inserted, so the next access retries.
    pub fn get_or_extract(
        &mut self,
        signal: &dyn Signal,
        extractor: &dyn OnDemandExtractor,
    ) -> Result<Arc<FeatureSeries>, FeatureError> {
        if let Some(series) = self.entries.get_refresh(signal.uri()) {
            self.hits += 1;
            debug!("Feature cache hit for '{}'", signal.uri());
            return Ok(Arc::clone(series));
        }

        self.misses += 1;
        debug!("Feature cache miss for '{}', extracting", signal.uri());
        let series = Arc::new(extractor.extract(signal)?);

        while self.entries.len() >= self.capacity {
            match self.entries.pop_front() {
                Some((uri, _)) => {
                    self.evictions += 1;
                    debug!("Feature cache evicted '{}'", uri);
                }
                None => break,
            }
        }
        self.entries
            .insert(signal.uri().to_string(), Arc::clone(&series));
        Ok(series)
    }

    /// Check if a signal's features are cached (does not refresh recency)
    pub fn contains(&self, uri: &str) -> bool {
        self.entries.contains_key(uri)
    }

    /// Number of cached series
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of cached series
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of lookups served from memory
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups that triggered extraction
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Number of entries removed by capacity pressure
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Drop all entries; counters are kept
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
