//! Sliding-Window Sequence Labeling
//!
//! Runs a fixed-input-size scoring model over many overlapping windows of a
//! signal's feature series and overlap-add averages the outputs back onto
//! the signal's native frame grid.

mod config;
mod labeler;
mod model;

pub use config::{ComputeTarget, LabelerConfig};
pub use labeler::{PredictionGrid, SequenceLabeler};
pub use model::ScoringModel;

use thiserror::Error;

/// Errors from pipeline construction and application
#[derive(Debug, Error)]
pub enum LabelingError {
    /// Model declares neither a class count nor an output dimension
    #[error("scoring model declares neither a class count nor an output dimension")]
    DimensionUnresolved,

    /// Configuration value out of range
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    /// Materialized window frame count differs from the plan
    #[error("materialized window has {actual} frames, expected {expected}")]
    WindowShape { expected: usize, actual: usize },

    /// Windows within one batch disagree on feature width
    #[error("windows in a batch disagree on feature width ({first} vs {other})")]
    FeatureWidth { first: usize, other: usize },

    /// Model returned a stack of the wrong shape
    #[error(
        "model returned {actual_rows}x{actual_cols} scores for a batch of \
         {expected_rows} windows of dimension {expected_cols}"
    )]
    ScoreShape {
        expected_rows: usize,
        expected_cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },

    /// Scoring failed inside the model
    #[error("scoring failed: {0}")]
    Scoring(String),

    /// Frame grid or window plan error
    #[error(transparent)]
    Grid(#[from] frame_grid::GridError),

    /// Feature resolution error
    #[error(transparent)]
    Feature(#[from] feature_store::FeatureError),
}
