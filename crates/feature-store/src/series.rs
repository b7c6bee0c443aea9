//! Per-Frame Feature Series

use crate::FeatureError;
use frame_grid::{FrameGrid, Segment};
use ndarray::{s, Array2, ArrayView2};

/// Feature vectors for every frame of one signal
///
/// Shape `(n_frames, n_features)`, aligned with the native frame grid of
/// the extractor that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSeries {
    data: Array2<f32>,
    grid: FrameGrid,
}

impl FeatureSeries {
    /// Wrap extracted feature data with its frame grid
    pub fn new(data: Array2<f32>, grid: FrameGrid) -> Self {
        Self { data, grid }
    }

    /// Number of frames in the series
    pub fn n_frames(&self) -> usize {
        self.data.nrows()
    }

    /// Width of each feature vector
    pub fn n_features(&self) -> usize {
        self.data.ncols()
    }

    /// Frame grid the series is expressed on
    pub fn grid(&self) -> FrameGrid {
        self.grid
    }

    /// Borrow the underlying data
    pub fn data(&self) -> ArrayView2<'_, f32> {
        self.data.view()
    }

    /// Centered fixed-duration crop
    ///
    /// Returns exactly `grid.samples(fixed)` frames centered on `segment`,
    /// shifted inward at series boundaries so the shape never varies.
    pub fn crop_centered(&self, segment: Segment, fixed: f64) -> Result<Array2<f32>, FeatureError> {
        let span = self.grid.crop_span(segment, fixed, self.n_frames())?;
        Ok(self.data.slice(s![span, ..]).to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;

    /// 100 frames at 10 per second, frame i holds [i, i]
    fn ramp_series() -> FeatureSeries {
        let grid = FrameGrid::new(0.0, 0.1, 0.1).unwrap();
        let data = Array::from_shape_fn((100, 2), |(i, _)| i as f32);
        FeatureSeries::new(data, grid)
    }

    #[test]
    fn test_interior_crop_shape_and_values() {
        let series = ramp_series();
        let window = series.crop_centered(Segment::new(0.5, 1.5), 1.0).unwrap();
        assert_eq!(window.dim(), (10, 2));
        assert_eq!(window[(0, 0)], 5.0);
        assert_eq!(window[(9, 1)], 14.0);
    }

    #[test]
    fn test_boundary_crops_keep_fixed_shape() {
        let series = ramp_series();
        let first = series.crop_centered(Segment::new(0.0, 1.0), 1.0).unwrap();
        let last = series.crop_centered(Segment::new(9.0, 10.0), 1.0).unwrap();
        assert_eq!(first.dim(), (10, 2));
        assert_eq!(last.dim(), (10, 2));
        assert_eq!(first[(0, 0)], 0.0);
        assert_eq!(last[(9, 0)], 99.0);
    }

    #[test]
    fn test_crop_longer_than_series_fails() {
        let grid = FrameGrid::new(0.0, 0.1, 0.1).unwrap();
        let series = FeatureSeries::new(Array2::zeros((5, 2)), grid);
        assert!(series.crop_centered(Segment::new(0.0, 0.5), 1.0).is_err());
    }
}
