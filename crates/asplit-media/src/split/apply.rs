//! Split orchestration: detector -> planner -> cutter.
//!
//! One call splits one file. The orchestrator holds only request-local
//! state; concurrent calls against the same source are not coordinated
//! here, callers needing that must serialize per path externally.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use asplit_models::TimeRange;

use super::config::SplitConfig;
use super::planner::plan_segments;
use crate::error::{MediaError, MediaResult};
use crate::toolkit::AudioToolkit;

/// Result of one split operation.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    /// Number of silence intervals the detector reported.
    pub silences: usize,
    /// Planned time ranges, in order. Empty when no silence was detected
    /// or the file held no audible span (e.g. silence end to end).
    pub segments: Vec<TimeRange>,
    /// Paths of the output files actually produced, in planned order.
    /// A range whose cut failed is skipped, so this can be shorter than
    /// `segments`.
    pub files: Vec<PathBuf>,
}

impl SplitOutcome {
    /// Outcome for a file with no detected silence.
    pub fn no_silence() -> Self {
        Self {
            silences: 0,
            segments: Vec::new(),
            files: Vec::new(),
        }
    }

    /// True when the detector found nothing to split at. A detected but
    /// fully silent file is not "unsplit" - it just plans zero segments.
    pub fn is_unsplit(&self) -> bool {
        self.silences == 0
    }
}

/// Split `input` into segments at silence boundaries.
///
/// Calls the detector first; when it reports no silence the probe and
/// cutter are never invoked and the outcome is empty. Otherwise the file
/// duration is probed, the planner produces the segment ranges, and each
/// range is cut to `<stem>_part_<NNN>.<ext>` - alongside the source, or
/// inside a subfolder named after it when `config.use_subfolder` is set.
///
/// A single failed cut is logged and skipped; probe and detector failures
/// abort the whole operation.
pub async fn split_file<T: AudioToolkit + ?Sized>(
    toolkit: &T,
    input: &Path,
    config: &SplitConfig,
) -> MediaResult<SplitOutcome> {
    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    let silences = toolkit
        .detect_silence(
            input,
            config.silence_threshold_db,
            config.silence_min_duration,
        )
        .await?;

    if silences.is_empty() {
        info!(path = %input.display(), "No silence detected, nothing to split");
        return Ok(SplitOutcome::no_silence());
    }

    let total_duration = toolkit.probe_duration(input).await?;
    let segments = plan_segments(total_duration, &silences, config)?;

    debug!(
        path = %input.display(),
        total_duration,
        silences = silences.len(),
        segments = segments.len(),
        "Split planned"
    );

    let output_dir = output_dir(input, config.use_subfolder);
    tokio::fs::create_dir_all(&output_dir).await?;

    let mut files = Vec::with_capacity(segments.len());
    for (index, range) in segments.iter().enumerate() {
        let out_path = output_dir.join(output_name(input, index + 1));

        match toolkit.cut_range(input, range, &out_path).await {
            Ok(()) => files.push(out_path),
            Err(e) => {
                // Best effort: skip the failed range, keep cutting the rest.
                warn!(
                    range = %range,
                    output = %out_path.display(),
                    error = %e,
                    "Cut failed, skipping segment"
                );
            }
        }
    }

    info!(
        path = %input.display(),
        segments = segments.len(),
        produced = files.len(),
        "Split complete"
    );

    Ok(SplitOutcome {
        silences: silences.len(),
        segments,
        files,
    })
}

/// Directory the output files go into.
fn output_dir(input: &Path, use_subfolder: bool) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new(""));
    if use_subfolder {
        parent.join(file_stem(input))
    } else {
        parent.to_path_buf()
    }
}

/// Output file name for the 1-indexed `ordinal`: `<stem>_part_<NNN>.<ext>`.
fn output_name(input: &Path, ordinal: usize) -> String {
    let stem = file_stem(input);
    match input.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}_part_{ordinal:03}.{ext}"),
        None => format!("{stem}_part_{ordinal:03}"),
    }
}

fn file_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio".to_string())
}
