//! Silence intervals reported by the detector.

use serde::{Deserialize, Serialize};

/// A detected span of near-silence in the audio.
///
/// Produced by the silence detector in ascending `start` order with no
/// overlap between intervals. Consumed read-only by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SilenceInterval {
    /// Time the silence begins, in seconds.
    pub start: f64,
    /// Time the silence ends, in seconds. Always `>= start`.
    pub end: f64,
}

impl SilenceInterval {
    /// Create a new silence interval.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Duration of the silence in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration() {
        let interval = SilenceInterval::new(10.0, 11.5);
        assert!((interval.duration() - 1.5).abs() < 1e-9);
    }
}
