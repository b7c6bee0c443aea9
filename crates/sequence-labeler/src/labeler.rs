//! Sliding-Window Sequence Labeler

use std::sync::Arc;

use feature_store::{FeatureCache, FeatureSeries, FeatureSource, PrecomputedSource, Signal};
use frame_grid::{FrameGrid, Segment, WindowPlan};
use ndarray::{s, Array1, Array2, ArrayView2, Axis};
use tracing::{debug, info};

use crate::config::LabelerConfig;
use crate::model::{resolve_dimension, ScoringModel};
use crate::LabelingError;

/// Per-frame predictions aligned 1:1 with the native frame grid
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionGrid {
    data: Array2<f32>,
    grid: FrameGrid,
}

impl PredictionGrid {
    fn new(data: Array2<f32>, grid: FrameGrid) -> Self {
        Self { data, grid }
    }

    /// Empty grid, returned when a signal yields no scored windows
    fn empty(grid: FrameGrid, dimension: usize) -> Self {
        Self {
            data: Array2::zeros((0, dimension)),
            grid,
        }
    }

    /// Number of native frames covered
    pub fn n_frames(&self) -> usize {
        self.data.nrows()
    }

    /// Score dimension per frame
    pub fn dimension(&self) -> usize {
        self.data.ncols()
    }

    /// Frame grid the predictions are expressed on
    pub fn grid(&self) -> FrameGrid {
        self.grid
    }

    /// Check if the grid holds no frames
    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    /// Borrow the per-frame scores
    pub fn data(&self) -> ArrayView2<'_, f32> {
        self.data.view()
    }

    /// Consume the grid, returning the raw scores
    pub fn into_data(self) -> Array2<f32> {
        self.data
    }
}

/// Where a window's frames come from during one `apply` call
enum FrameSource<'a> {
    /// Whole series resident in memory (embedded in the record, or cached)
    Resident(&'a FeatureSeries),
    /// Cropped per window from a precomputed store
    PerWindow(&'a dyn PrecomputedSource),
}

impl<'a> FrameSource<'a> {
    fn crop(
        &self,
        signal: &dyn Signal,
        segment: Segment,
        fixed: f64,
    ) -> Result<Array2<f32>, LabelingError> {
        match self {
            FrameSource::Resident(series) => Ok(series.crop_centered(segment, fixed)?),
            FrameSource::PerWindow(source) => Ok(source.crop_centered(signal, segment, fixed)?),
        }
    }

    fn frame_count(&self, signal: &dyn Signal) -> Result<usize, LabelingError> {
        match self {
            FrameSource::Resident(series) => Ok(series.n_frames()),
            FrameSource::PerWindow(source) => Ok(source.frame_count(signal)?),
        }
    }
}

/// Sliding-window sequence labeling pipeline
///
/// Drives segment generation, window materialization, batched scoring, and
/// overlap-add aggregation behind a single entry point, [`apply`].
///
/// The labeler owns its feature cache; `apply` takes `&mut self` because
/// LRU bookkeeping is not reentrant-safe, so one pipeline serves one caller
/// at a time.
///
/// [`apply`]: SequenceLabeler::apply
pub struct SequenceLabeler {
    config: LabelerConfig,
    plan: WindowPlan,
    model: Box<dyn ScoringModel>,
    features: FeatureSource,
    cache: FeatureCache,
    dimension: usize,
}

impl SequenceLabeler {
    /// Create a pipeline around a scoring model and an extraction strategy
    ///
    /// The model's output dimension is resolved here, before any extraction
    /// or scoring work, and the model is bound to the configured compute
    /// target.
    pub fn new(
        mut model: Box<dyn ScoringModel>,
        features: FeatureSource,
        config: LabelerConfig,
    ) -> Result<Self, LabelingError> {
        config.validate()?;
        let dimension = resolve_dimension(model.as_ref())?;
        model.prepare(config.compute)?;
        let plan = WindowPlan::new(config.duration, config.step, config.min_duration)?;
        let cache = FeatureCache::new(config.cache_capacity);
        info!(
            "Creating sequence labeler: duration={}s, step={}s, batch_size={}, dimension={}",
            plan.duration(),
            plan.step(),
            config.batch_size,
            dimension
        );
        Ok(Self {
            config,
            plan,
            model,
            features,
            cache,
            dimension,
        })
    }

    /// Resolved model output dimension
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Native frame grid of the selected extraction strategy
    pub fn frame_grid(&self) -> FrameGrid {
        self.features.frame_grid()
    }

    /// Window plan derived from the configuration
    pub fn plan(&self) -> &WindowPlan {
        &self.plan
    }

    /// Feature cache owned by this pipeline
    pub fn cache(&self) -> &FeatureCache {
        &self.cache
    }

    /// Compute per-frame predictions for a signal on a sliding window
    ///
    /// Windows are materialized in generation order, scored in batches of
    /// `batch_size`, and averaged back onto the native frame grid. A signal
    /// yielding no scored windows produces an empty `(0, dimension)` grid.
    pub fn apply(&mut self, signal: &dyn Signal) -> Result<PredictionGrid, LabelingError> {
        let grid = self.features.frame_grid();
        let duration = self.plan.duration();
        let window_frames = grid.samples(duration);

        // Resolve the whole series once for the in-memory paths; the
        // precomputed store crops per window instead. Embedded features
        // win under either strategy and never touch the cache.
        let cached: Arc<FeatureSeries>;
        let source = match (signal.features(), &self.features) {
            (Some(embedded), _) => FrameSource::Resident(embedded),
            (None, FeatureSource::OnDemand(extractor)) => {
                cached = self.cache.get_or_extract(signal, extractor.as_ref())?;
                FrameSource::Resident(&cached)
            }
            (None, FeatureSource::Precomputed(store)) => FrameSource::PerWindow(store.as_ref()),
        };

        let mut pending_segments: Vec<Segment> = Vec::with_capacity(self.config.batch_size);
        let mut pending_windows: Vec<Array2<f32>> = Vec::with_capacity(self.config.batch_size);
        let mut scored: Vec<(Segment, Array1<f32>)> = Vec::new();

        for segment in self.plan.segments(signal.extent()) {
            let window = source.crop(signal, segment, duration)?;
            if window.nrows() != window_frames {
                return Err(LabelingError::WindowShape {
                    expected: window_frames,
                    actual: window.nrows(),
                });
            }
            pending_segments.push(segment);
            pending_windows.push(window);

            if pending_windows.len() == self.config.batch_size {
                score_batch(
                    self.model.as_ref(),
                    self.dimension,
                    &mut pending_segments,
                    &mut pending_windows,
                    &mut scored,
                )?;
            }
        }

        if !pending_windows.is_empty() {
            if self.config.allow_incomplete {
                score_batch(
                    self.model.as_ref(),
                    self.dimension,
                    &mut pending_segments,
                    &mut pending_windows,
                    &mut scored,
                )?;
            } else {
                debug!(
                    "Dropping {} trailing windows below batch size {}",
                    pending_windows.len(),
                    self.config.batch_size
                );
            }
        }

        if scored.is_empty() {
            debug!("No scored windows for '{}', returning empty grid", signal.uri());
            return Ok(PredictionGrid::empty(grid, self.dimension));
        }

        let n_frames = source.frame_count(signal)?;
        let mut sum = Array2::<f32>::zeros((n_frames, self.dimension));
        let mut count = Array1::<u32>::zeros(n_frames);

        for (segment, scores) in &scored {
            // Same span computation as materialization, so aggregation
            // touches exactly the frames the window was read from.
            let span = grid.crop_span(*segment, duration, n_frames)?;
            let mut block = sum.slice_mut(s![span.clone(), ..]);
            block += scores;
            for c in count.slice_mut(s![span]).iter_mut() {
                *c += 1;
            }
        }

        for (mut row, &c) in sum.outer_iter_mut().zip(count.iter()) {
            row /= c.max(1) as f32;
        }

        debug!(
            "Aggregated {} windows over {} frames for '{}'",
            scored.len(),
            n_frames,
            signal.uri()
        );
        Ok(PredictionGrid::new(sum, grid))
    }
}

/// Stack the pending windows, score them in one model invocation, and zip
/// the returned rows back with their segments
fn score_batch(
    model: &dyn ScoringModel,
    dimension: usize,
    segments: &mut Vec<Segment>,
    windows: &mut Vec<Array2<f32>>,
    scored: &mut Vec<(Segment, Array1<f32>)>,
) -> Result<(), LabelingError> {
    let width = windows[0].ncols();
    for window in windows.iter().skip(1) {
        if window.ncols() != width {
            return Err(LabelingError::FeatureWidth {
                first: width,
                other: window.ncols(),
            });
        }
    }

    let views: Vec<_> = windows.iter().map(|w| w.view()).collect();
    let stacked =
        ndarray::stack(Axis(0), &views).map_err(|e| LabelingError::Scoring(e.to_string()))?;
    debug!("Scoring batch of {} windows", windows.len());
    let output = model.score(stacked.view())?;

    if output.nrows() != windows.len() || output.ncols() != dimension {
        return Err(LabelingError::ScoreShape {
            expected_rows: windows.len(),
            expected_cols: dimension,
            actual_rows: output.nrows(),
            actual_cols: output.ncols(),
        });
    }

    for (segment, row) in segments.drain(..).zip(output.outer_iter()) {
        scored.push((segment, row.to_owned()));
    }
    windows.clear();
    Ok(())
}
