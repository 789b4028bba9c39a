//! Output time ranges.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A contiguous span of the source file destined to become one output file.
///
/// Ranges produced by the planner are ordered by `start` and each has
/// `end > start`. Adjacent ranges may overlap by up to twice the configured
/// padding at silence boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

impl TimeRange {
    /// Create a new time range.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Duration of this range in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}s, {:.3}s]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration() {
        let range = TimeRange::new(10.5, 50.5);
        assert!((range.duration() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_serde_round_trip() {
        let range = TimeRange::new(0.0, 12.25);
        let json = serde_json::to_string(&range).unwrap();
        let back: TimeRange = serde_json::from_str(&json).unwrap();
        assert_eq!(range, back);
    }
}
