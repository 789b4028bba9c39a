//! Collaborator seam over the external media binaries.
//!
//! The split orchestrator only needs three capabilities from the host:
//! probing a duration, detecting silences, and cutting a range. They are
//! expressed as a trait so the orchestrator can be exercised without
//! ffmpeg installed; [`FfmpegToolkit`] is the production implementation.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use asplit_models::{SilenceInterval, TimeRange};

use crate::command::{check_ffmpeg, check_ffprobe};
use crate::error::MediaResult;
use crate::{cut, probe, silence};

/// External media capabilities consumed by the split orchestrator.
#[async_trait]
pub trait AudioToolkit: Send + Sync {
    /// Total duration of the file in seconds.
    async fn probe_duration(&self, path: &Path) -> MediaResult<f64>;

    /// Ordered, non-overlapping silence intervals in the file.
    async fn detect_silence(
        &self,
        path: &Path,
        noise_db: f64,
        min_duration: f64,
    ) -> MediaResult<Vec<SilenceInterval>>;

    /// Write `range` of `input` to `output` without re-encoding.
    async fn cut_range(&self, input: &Path, range: &TimeRange, output: &Path)
        -> MediaResult<()>;
}

/// FFmpeg-backed toolkit with injected binary paths.
#[derive(Debug, Clone)]
pub struct FfmpegToolkit {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl FfmpegToolkit {
    /// Create a toolkit from explicit binary paths.
    pub fn new(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    /// Resolve ffmpeg and ffprobe from the PATH.
    pub fn discover() -> MediaResult<Self> {
        let ffmpeg = check_ffmpeg()?;
        let ffprobe = check_ffprobe()?;
        Ok(Self { ffmpeg, ffprobe })
    }

    /// Resolved ffmpeg binary path.
    pub fn ffmpeg(&self) -> &Path {
        &self.ffmpeg
    }

    /// Resolved ffprobe binary path.
    pub fn ffprobe(&self) -> &Path {
        &self.ffprobe
    }
}

#[async_trait]
impl AudioToolkit for FfmpegToolkit {
    async fn probe_duration(&self, path: &Path) -> MediaResult<f64> {
        probe::probe_duration(&self.ffprobe, path).await
    }

    async fn detect_silence(
        &self,
        path: &Path,
        noise_db: f64,
        min_duration: f64,
    ) -> MediaResult<Vec<SilenceInterval>> {
        silence::detect_silence(&self.ffmpeg, path, noise_db, min_duration).await
    }

    async fn cut_range(
        &self,
        input: &Path,
        range: &TimeRange,
        output: &Path,
    ) -> MediaResult<()> {
        cut::cut_range(&self.ffmpeg, input, range, output).await
    }
}
