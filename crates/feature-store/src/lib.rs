//! Feature Series Store
//!
//! Signal records, per-frame feature series, the two extraction strategies
//! (on-demand and precomputed), and the bounded LRU cache that avoids
//! repeated whole-signal extraction.

mod cache;
mod extract;
mod series;

pub use cache::{FeatureCache, DEFAULT_CACHE_CAPACITY};
pub use extract::{FeatureSource, OnDemandExtractor, PrecomputedSource, Signal};
pub use series::FeatureSeries;

use thiserror::Error;

/// Errors during feature resolution
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Whole-signal extraction failed
    #[error("feature extraction failed for '{uri}': {reason}")]
    Extraction { uri: String, reason: String },

    /// Per-window crop against a precomputed store failed
    #[error("precomputed feature lookup failed for '{uri}': {reason}")]
    Precomputed { uri: String, reason: String },

    /// Frame indexing error
    #[error(transparent)]
    Grid(#[from] frame_grid::GridError),
}
