//! Scoring Model Interface

use crate::{ComputeTarget, LabelingError};
use ndarray::{Array2, ArrayView3};

/// Batched scoring model plugged into the pipeline
///
/// Implementations must be context-free across windows: the score of a
/// window may not depend on which batch it was grouped into. Exactly one of
/// `n_classes` and `output_dim` must return `Some`; when both do, the class
/// count wins.
pub trait ScoringModel {
    /// Number of output classes, when the model is a classifier
    fn n_classes(&self) -> Option<usize> {
        None
    }

    /// Raw output dimension, for models without a class count
    fn output_dim(&self) -> Option<usize> {
        None
    }

    /// Bind the model to a compute target before any scoring
    fn prepare(&mut self, _target: ComputeTarget) -> Result<(), LabelingError> {
        Ok(())
    }

    /// Score a `(batch, window_frames, n_features)` stack
    ///
    /// Returns one score vector per window, `(batch, dimension)`, in the
    /// same order as the input stack.
    fn score(&self, batch: ArrayView3<'_, f32>) -> Result<Array2<f32>, LabelingError>;
}

/// Resolve the model output dimension, class count first
pub(crate) fn resolve_dimension(model: &dyn ScoringModel) -> Result<usize, LabelingError> {
    model
        .n_classes()
        .or_else(|| model.output_dim())
        .ok_or(LabelingError::DimensionUnresolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Classifier;

    impl ScoringModel for Classifier {
        fn n_classes(&self) -> Option<usize> {
            Some(4)
        }

        fn output_dim(&self) -> Option<usize> {
            Some(9)
        }

        fn score(&self, batch: ArrayView3<'_, f32>) -> Result<Array2<f32>, LabelingError> {
            Ok(Array2::zeros((batch.shape()[0], 4)))
        }
    }

    struct Embedder;

    impl ScoringModel for Embedder {
        fn output_dim(&self) -> Option<usize> {
            Some(128)
        }

        fn score(&self, batch: ArrayView3<'_, f32>) -> Result<Array2<f32>, LabelingError> {
            Ok(Array2::zeros((batch.shape()[0], 128)))
        }
    }

    struct Undeclared;

    impl ScoringModel for Undeclared {
        fn score(&self, batch: ArrayView3<'_, f32>) -> Result<Array2<f32>, LabelingError> {
            Ok(Array2::zeros((batch.shape()[0], 1)))
        }
    }

    #[test]
    fn test_class_count_wins_over_output_dim() {
        assert_eq!(resolve_dimension(&Classifier).unwrap(), 4);
    }

    #[test]
    fn test_output_dim_alone_resolves() {
        assert_eq!(resolve_dimension(&Embedder).unwrap(), 128);
    }

    #[test]
    fn test_undeclared_dimension_fails() {
        assert!(matches!(
            resolve_dimension(&Undeclared),
            Err(LabelingError::DimensionUnresolved)
        ));
    }
}
