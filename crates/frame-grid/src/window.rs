//! Sliding-Window Plan and Segment Generation

use crate::{GridError, Segment};
use serde::{Deserialize, Serialize};

/// Tolerance absorbing f64 accumulation at window boundaries
const BOUNDARY_EPSILON: f64 = 1e-9;

/// Sliding-window plan: duration and spacing of the windows scored per signal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowPlan {
    duration: f64,
    step: f64,
    min_duration: Option<f64>,
}

impl WindowPlan {
    /// Create a plan; `step` defaults to half the window duration
    ///
    /// When `min_duration` is set, a shorter trailing window of at least
    /// that length is emitted when the remaining extent cannot hold a full
    /// window.
    pub fn new(
        duration: f64,
        step: Option<f64>,
        min_duration: Option<f64>,
    ) -> Result<Self, GridError> {
        if !(duration > 0.0) {
            return Err(GridError::OutOfRange {
                field: "duration",
                value: duration,
                reason: "must be positive",
            });
        }
        let step = step.unwrap_or(duration / 2.0);
        if !(step > 0.0) {
            return Err(GridError::OutOfRange {
                field: "step",
                value: step,
                reason: "must be positive",
            });
        }
        if let Some(min) = min_duration {
            if !(min > 0.0) {
                return Err(GridError::OutOfRange {
                    field: "min_duration",
                    value: min,
                    reason: "must be positive",
                });
            }
            if min > duration {
                return Err(GridError::OutOfRange {
                    field: "min_duration",
                    value: min,
                    reason: "must not exceed duration",
                });
            }
        }
        Ok(Self {
            duration,
            step,
            min_duration,
        })
    }

    /// Window duration (seconds)
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Spacing between consecutive window starts (seconds)
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Minimum duration allowed for a shorter trailing window
    pub fn min_duration(&self) -> Option<f64> {
        self.min_duration
    }

    /// Number of full-duration windows that fit in `extent_duration`
    pub fn full_windows(&self, extent_duration: f64) -> usize {
        if extent_duration + BOUNDARY_EPSILON < self.duration {
            return 0;
        }
        ((extent_duration - self.duration) / self.step + BOUNDARY_EPSILON).floor() as usize + 1
    }

    /// Lazy, restartable sequence of window segments covering `extent`
    pub fn segments(&self, extent: Segment) -> SegmentIter {
        SegmentIter {
            plan: self.clone(),
            extent,
            full: self.full_windows(extent.duration()),
            next: 0,
            trailing_done: false,
        }
    }
}

/// Iterator over the windows of a plan across one extent
///
/// Yields full-duration windows `[start + i*step, start + i*step + duration)`
/// in order, then at most one shorter trailing window when the plan permits
/// it. Cloning restarts the sequence from the beginning.
#[derive(Debug, Clone)]
pub struct SegmentIter {
    plan: WindowPlan,
    extent: Segment,
    full: usize,
    next: usize,
    trailing_done: bool,
}

impl Iterator for SegmentIter {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if self.next < self.full {
            let start = self.extent.start + self.next as f64 * self.plan.step;
            self.next += 1;
            return Some(Segment::new(start, start + self.plan.duration));
        }

        if !self.trailing_done {
            self.trailing_done = true;
            let start = self.extent.start + self.full as f64 * self.plan.step;
            let remainder = self.extent.end - start;
            if let Some(min) = self.plan.min_duration {
                if remainder > 0.0 && remainder + BOUNDARY_EPSILON >= min {
                    return Some(Segment::new(start, self.extent.end));
                }
            }
        }

        None
    }
}
