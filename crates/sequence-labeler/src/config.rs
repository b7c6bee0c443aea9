//! Pipeline Configuration

use crate::LabelingError;
use feature_store::DEFAULT_CACHE_CAPACITY;
use serde::{Deserialize, Serialize};

/// Compute target the scoring model is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ComputeTarget {
    /// Generic CPU execution
    #[default]
    Cpu,
    /// Accelerator device, by index
    Accelerator(usize),
}

/// Sequence labeler configuration, immutable for the pipeline's lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelerConfig {
    /// Window duration (seconds)
    pub duration: f64,

    /// Minimum duration for a shorter trailing window (seconds)
    pub min_duration: Option<f64>,

    /// Spacing between window starts (seconds); half the duration when unset
    pub step: Option<f64>,

    /// Number of windows scored per model invocation
    pub batch_size: usize,

    /// Whether a final batch smaller than `batch_size` is scored
    pub allow_incomplete: bool,

    /// Compute target handed to the scoring model
    pub compute: ComputeTarget,

    /// Number of whole-signal feature series kept in the cache
    pub cache_capacity: usize,
}

impl Default for LabelerConfig {
    fn default() -> Self {
        Self {
            duration: 1.0,
            min_duration: None,
            step: None,
            batch_size: 32,
            allow_incomplete: true,
            compute: ComputeTarget::Cpu,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl LabelerConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), LabelingError> {
        if !(self.duration > 0.0) {
            return Err(LabelingError::InvalidConfig {
                field: "duration",
                reason: "must be positive",
            });
        }
        if let Some(step) = self.step {
            if !(step > 0.0) {
                return Err(LabelingError::InvalidConfig {
                    field: "step",
                    reason: "must be positive",
                });
            }
        }
        if let Some(min) = self.min_duration {
            if !(min > 0.0) {
                return Err(LabelingError::InvalidConfig {
                    field: "min_duration",
                    reason: "must be positive",
                });
            }
            if min > self.duration {
                return Err(LabelingError::InvalidConfig {
                    field: "min_duration",
                    reason: "must not exceed duration",
                });
            }
        }
        if self.batch_size == 0 {
            return Err(LabelingError::InvalidConfig {
                field: "batch_size",
                reason: "must be at least 1",
            });
        }
        if self.cache_capacity == 0 {
            return Err(LabelingError::InvalidConfig {
                field: "cache_capacity",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LabelerConfig::default();
        assert_eq!(config.duration, 1.0);
        assert_eq!(config.batch_size, 32);
        assert_eq!(config.cache_capacity, 12);
        assert_eq!(config.compute, ComputeTarget::Cpu);
        assert!(config.allow_incomplete);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_invalid_values() {
        let mut config = LabelerConfig {
            batch_size: 0,
            ..LabelerConfig::default()
        };
        assert!(config.validate().is_err());

        config.batch_size = 8;
        config.min_duration = Some(2.0);
        assert!(config.validate().is_err());

        config.min_duration = None;
        config.cache_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = LabelerConfig {
            duration: 2.0,
            min_duration: Some(0.5),
            step: Some(0.25),
            batch_size: 16,
            allow_incomplete: false,
            compute: ComputeTarget::Accelerator(1),
            cache_capacity: 4,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: LabelerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.duration, config.duration);
        assert_eq!(back.min_duration, config.min_duration);
        assert_eq!(back.step, config.step);
        assert_eq!(back.batch_size, config.batch_size);
        assert_eq!(back.allow_incomplete, config.allow_incomplete);
        assert_eq!(back.compute, config.compute);
        assert_eq!(back.cache_capacity, config.cache_capacity);
    }
}
