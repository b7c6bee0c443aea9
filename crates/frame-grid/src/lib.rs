//! Time Grids and Sliding-Window Segmentation
//!
//! Leaf crate shared by the feature store and the labeling pipeline:
//! half-open time segments, the native frame grid on which features and
//! predictions are expressed, and the sliding-window segment generator.

mod grid;
mod segment;
mod window;

pub use grid::FrameGrid;
pub use segment::Segment;
pub use window::{SegmentIter, WindowPlan};

use thiserror::Error;

/// Errors from grid and window-plan construction or frame indexing
#[derive(Debug, Clone, Error)]
pub enum GridError {
    /// Parameter out of allowed range
    #[error("{field} value {value} is invalid: {reason}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Fixed-length crop longer than the series it is applied to
    #[error("window of {needed} frames exceeds series of {available} frames")]
    WindowExceedsSeries { needed: usize, available: usize },
}
