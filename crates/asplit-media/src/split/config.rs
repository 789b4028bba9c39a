//! Configuration for silence-driven splitting.
//!
//! These parameters control how silence is detected and how the detected
//! gaps are turned into output segments. The defaults are tuned for spoken
//! recordings (lectures, interviews, sermon tapes) with clear pauses.

use serde::{Deserialize, Serialize};

/// Parameters for one split operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Noise floor in dB for silence detection.
    ///
    /// Audio quieter than this counts as silence.
    /// - Higher values (-20): aggressive, quiet speech may count as silence
    /// - Default (-30): works for most voice recordings
    /// - Lower values (-40, -50): only near-total silence is detected
    pub silence_threshold_db: f64,

    /// Minimum silence duration in seconds worth splitting at.
    ///
    /// Short breath pauses stay inside a segment; only gaps at least this
    /// long become segment boundaries.
    pub silence_min_duration: f64,

    /// Extra seconds kept on either side of a silence boundary.
    ///
    /// Segments grow backward into the trailing padding of the previous
    /// silence and forward into the leading padding of the next one, so
    /// speech onsets and tails are not clipped. Adjacent segments may
    /// overlap by up to twice this value.
    pub padding: f64,

    /// Advisory minimum output segment length in seconds.
    ///
    /// Segments shorter than this are merged forward into their successor.
    /// A sole segment, or a trailing segment with no merge partner left,
    /// is emitted short.
    pub min_segment_length: f64,

    /// Whether to route output files into a subfolder named after the
    /// source file instead of placing them alongside it.
    pub use_subfolder: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            silence_threshold_db: -30.0,
            silence_min_duration: 1.0,
            padding: 0.5,
            min_segment_length: 20.0,
            use_subfolder: true,
        }
    }
}

impl SplitConfig {
    /// Builder-style setter for the silence noise floor.
    pub fn with_threshold_db(mut self, db: f64) -> Self {
        self.silence_threshold_db = db;
        self
    }

    /// Builder-style setter for the minimum silence duration.
    pub fn with_min_silence(mut self, seconds: f64) -> Self {
        self.silence_min_duration = seconds.max(0.0);
        self
    }

    /// Builder-style setter for boundary padding.
    pub fn with_padding(mut self, seconds: f64) -> Self {
        self.padding = seconds.max(0.0);
        self
    }

    /// Builder-style setter for the minimum segment length.
    pub fn with_min_segment_length(mut self, seconds: f64) -> Self {
        self.min_segment_length = seconds.max(0.0);
        self
    }

    /// Builder-style setter for subfolder routing.
    pub fn with_subfolder(mut self, enabled: bool) -> Self {
        self.use_subfolder = enabled;
        self
    }
}
