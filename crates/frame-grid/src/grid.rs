//! Native Frame Grid

use crate::{GridError, Segment};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Regular frame grid on which features and predictions are expressed
///
/// Frame `i` covers `[start + i * step, start + i * step + duration)`.
/// The grid is defined by the feature extractor; every pipeline output is
/// aligned 1:1 with it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameGrid {
    start: f64,
    duration: f64,
    step: f64,
}

impl FrameGrid {
    /// Create a grid; `duration` and `step` must be positive
    pub fn new(start: f64, duration: f64, step: f64) -> Result<Self, GridError> {
        if !(duration > 0.0) {
            return Err(GridError::OutOfRange {
                field: "frame duration",
                value: duration,
                reason: "must be positive",
            });
        }
        if !(step > 0.0) {
            return Err(GridError::OutOfRange {
                field: "frame step",
                value: step,
                reason: "must be positive",
            });
        }
        Ok(Self {
            start,
            duration,
            step,
        })
    }

    /// Grid origin (seconds)
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Duration of a single frame (seconds)
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Spacing between consecutive frame starts (seconds)
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Index of the frame whose center is closest to `t`
    ///
    /// May be negative for timestamps before the grid origin.
    pub fn closest_frame(&self, t: f64) -> i64 {
        ((t - self.start - 0.5 * self.duration) / self.step).round() as i64
    }

    /// Number of frames implied by a duration
    pub fn samples(&self, duration: f64) -> usize {
        (duration / self.step).round().max(0.0) as usize
    }

    /// Centered fixed-length frame span for a segment
    ///
    /// Returns exactly `samples(fixed)` frame indices centered on the
    /// segment, shifted inward when the span would cross either boundary of
    /// a series of `n_frames` frames. The same span computation serves both
    /// window materialization and overlap-add aggregation, so the two always
    /// agree on which frames a window touches.
    pub fn crop_span(
        &self,
        segment: Segment,
        fixed: f64,
        n_frames: usize,
    ) -> Result<Range<usize>, GridError> {
        let len = self.samples(fixed);
        if len > n_frames {
            return Err(GridError::WindowExceedsSeries {
                needed: len,
                available: n_frames,
            });
        }

        let mut first = self.closest_frame(segment.middle()) - (len as i64) / 2;
        if first < 0 {
            first = 0;
        }
        let mut first = first as usize;
        if first + len > n_frames {
            first = n_frames - len;
        }
        Ok(first..first + len)
    }
}
