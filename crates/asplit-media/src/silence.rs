//! Silence detection via FFmpeg's `silencedetect` filter.
//!
//! FFmpeg reports detected silences as stderr diagnostics:
//!
//! ```text
//! [silencedetect @ 0x5562] silence_start: 10.213
//! [silencedetect @ 0x5562] silence_end: 11.529 | silence_duration: 1.316
//! ```
//!
//! The lines are parsed into structured [`SilenceInterval`]s; everything
//! downstream of this module is independent of the parsing strategy.

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

use asplit_models::SilenceInterval;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Detect silences in an audio file.
///
/// # Arguments
/// - `ffmpeg`: resolved ffmpeg binary path
/// - `path`: audio file to analyze
/// - `noise_db`: noise floor in dB; audio below it counts as silence
/// - `min_duration`: minimum silence length in seconds worth reporting
///
/// Returns intervals in ascending time order, non-overlapping. An empty
/// result means the detector found no silence at the given threshold.
pub async fn detect_silence(
    ffmpeg: &Path,
    path: &Path,
    noise_db: f64,
    min_duration: f64,
) -> MediaResult<Vec<SilenceInterval>> {
    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    // silencedetect logs at info level, so the default "error" is too quiet
    let cmd = FfmpegCommand::new(path, "-")
        .audio_filter(format!(
            "silencedetect=noise={}dB:d={}",
            noise_db, min_duration
        ))
        .format("null")
        .log_level("info");

    let stderr = FfmpegRunner::new(ffmpeg).run_capturing_stderr(&cmd).await?;
    let intervals = parse_silencedetect(&stderr);

    debug!(
        path = %path.display(),
        noise_db,
        min_duration,
        intervals = intervals.len(),
        "Silence detection complete"
    );

    Ok(intervals)
}

fn start_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"silence_start:\s*(-?\d+(?:\.\d+)?)").expect("valid regex"))
}

fn end_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"silence_end:\s*(-?\d+(?:\.\d+)?)").expect("valid regex"))
}

/// Parse `silencedetect` stderr diagnostics into intervals.
///
/// Starts and ends are paired in stream order. A trailing `silence_start`
/// with no matching end (silence running to EOF) is dropped; the planner's
/// trailing candidate covers that tail. A slightly negative reported start
/// is clamped to 0.
fn parse_silencedetect(stderr: &str) -> Vec<SilenceInterval> {
    let mut intervals = Vec::new();
    let mut pending_start: Option<f64> = None;

    for line in stderr.lines() {
        if let Some(caps) = start_re().captures(line) {
            if let Ok(start) = caps[1].parse::<f64>() {
                pending_start = Some(start.max(0.0));
            }
        } else if let Some(caps) = end_re().captures(line) {
            if let (Some(start), Ok(end)) = (pending_start.take(), caps[1].parse::<f64>()) {
                if end >= start {
                    intervals.push(SilenceInterval::new(start, end));
                }
            }
        }
    }

    intervals
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_STDERR: &str = "\
Input #0, mp3, from 'episode.mp3':
  Duration: 00:01:40.00, start: 0.000000, bitrate: 128 kb/s
[silencedetect @ 0x5562a8] silence_start: 10.213
[silencedetect @ 0x5562a8] silence_end: 11.529 | silence_duration: 1.316
[silencedetect @ 0x5562a8] silence_start: 50.002
[silencedetect @ 0x5562a8] silence_end: 51.107 | silence_duration: 1.105
size=N/A time=00:01:40.00 bitrate=N/A speed= 512x
";

    #[test]
    fn test_parse_pairs_in_order() {
        let intervals = parse_silencedetect(SAMPLE_STDERR);
        assert_eq!(intervals.len(), 2);
        assert!((intervals[0].start - 10.213).abs() < 1e-9);
        assert!((intervals[0].end - 11.529).abs() < 1e-9);
        assert!((intervals[1].start - 50.002).abs() < 1e-9);
        assert!((intervals[1].end - 51.107).abs() < 1e-9);
    }

    #[test]
    fn test_parse_clamps_negative_start() {
        let stderr = "\
[silencedetect @ 0x1] silence_start: -0.011750
[silencedetect @ 0x1] silence_end: 1.5 | silence_duration: 1.511
";
        let intervals = parse_silencedetect(stderr);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].start, 0.0);
        assert!((intervals[0].end - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_parse_drops_trailing_unmatched_start() {
        let stderr = "\
[silencedetect @ 0x1] silence_start: 5.0
[silencedetect @ 0x1] silence_end: 7.0 | silence_duration: 2.0
[silencedetect @ 0x1] silence_start: 95.0
";
        let intervals = parse_silencedetect(stderr);
        assert_eq!(intervals.len(), 1);
        assert!((intervals[0].start - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_no_silence() {
        let stderr = "size=N/A time=00:00:30.00 bitrate=N/A speed= 600x\n";
        assert!(parse_silencedetect(stderr).is_empty());
    }
}
