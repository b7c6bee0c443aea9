//! Time Segments

use serde::{Deserialize, Serialize};

/// Half-open time interval `[start, end)`, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time (seconds)
    pub start: f64,
    /// End time (seconds), exclusive
    pub end: f64,
}

impl Segment {
    /// Create a new segment
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Segment length in seconds (zero for degenerate segments)
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// Midpoint of the segment
    pub fn middle(&self) -> f64 {
        0.5 * (self.start + self.end)
    }

    /// Check if the segment covers no time
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check if a timestamp falls within the segment
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_and_middle() {
        let segment = Segment::new(1.0, 3.0);
        assert_eq!(segment.duration(), 2.0);
        assert_eq!(segment.middle(), 2.0);
        assert!(!segment.is_empty());
    }

    #[test]
    fn test_half_open_contains() {
        let segment = Segment::new(0.5, 1.5);
        assert!(segment.contains(0.5));
        assert!(segment.contains(1.0));
        assert!(!segment.contains(1.5));
        assert!(!segment.contains(0.4));
    }

    #[test]
    fn test_degenerate_segment() {
        let segment = Segment::new(2.0, 2.0);
        assert!(segment.is_empty());
        assert_eq!(segment.duration(), 0.0);

        let reversed = Segment::new(3.0, 1.0);
        assert!(reversed.is_empty());
        assert_eq!(reversed.duration(), 0.0);
    }
}
