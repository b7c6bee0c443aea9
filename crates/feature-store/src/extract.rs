//! Extraction Strategies

use crate::{FeatureError, FeatureSeries};
use frame_grid::{FrameGrid, Segment};
use ndarray::Array2;

/// A time-indexed signal record, owned by the caller
///
/// The pipeline only needs a stable identifier, the usable extent, and an
/// optional feature series already embedded in the record.
pub trait Signal {
    /// Stable unique identifier for the signal
    fn uri(&self) -> &str;

    /// Usable extent of the signal
    fn extent(&self) -> Segment;

    /// Features already embedded in the record, if any
    fn features(&self) -> Option<&FeatureSeries> {
        None
    }
}

/// Whole-signal feature extraction computed on demand
pub trait OnDemandExtractor {
    /// Native frame grid of the extractor output
    fn frame_grid(&self) -> FrameGrid;

    /// Extract the full feature series for a signal
    fn extract(&self, signal: &dyn Signal) -> Result<FeatureSeries, FeatureError>;
}

/// Features precomputed on disk, cropped per window
///
/// Serves fixed-length crops without materializing the whole series in
/// memory, so the feature cache is never involved.
pub trait PrecomputedSource {
    /// Native frame grid of the stored features
    fn frame_grid(&self) -> FrameGrid;

    /// Total native frame count for a signal
    fn frame_count(&self, signal: &dyn Signal) -> Result<usize, FeatureError>;

    /// Centered fixed-duration crop for one window
    fn crop_centered(
        &self,
        signal: &dyn Signal,
        segment: Segment,
        fixed: f64,
    ) -> Result<Array2<f32>, FeatureError>;
}

/// Extraction strategy, selected once at pipeline construction
pub enum FeatureSource {
    /// Compute whole-signal features on demand; results go through the cache
    OnDemand(Box<dyn OnDemandExtractor>),
    /// Crop windows directly from a precomputed store; the cache stays empty
    Precomputed(Box<dyn PrecomputedSource>),
}

impl FeatureSource {
    /// Native frame grid of the selected strategy
    pub fn frame_grid(&self) -> FrameGrid {
        match self {
            FeatureSource::OnDemand(extractor) => extractor.frame_grid(),
            FeatureSource::Precomputed(source) => source.frame_grid(),
        }
    }
}
