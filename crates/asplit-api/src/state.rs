//! Application state.

use std::sync::Arc;

use asplit_media::command::{check_ffmpeg, check_ffprobe};
use asplit_media::{FfmpegToolkit, MediaResult};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub toolkit: Arc<FfmpegToolkit>,
}

impl AppState {
    /// Create new application state, resolving the media binaries once.
    ///
    /// Explicit `FFMPEG_PATH`/`FFPROBE_PATH` overrides win; otherwise the
    /// binaries are looked up on the PATH. Either way the resolved paths
    /// are injected into the toolkit, never re-discovered per request.
    pub fn new(config: ApiConfig) -> MediaResult<Self> {
        let ffmpeg = match &config.ffmpeg_path {
            Some(path) => path.clone(),
            None => check_ffmpeg()?,
        };
        let ffprobe = match &config.ffprobe_path {
            Some(path) => path.clone(),
            None => check_ffprobe()?,
        };

        Ok(Self {
            config,
            toolkit: Arc::new(FfmpegToolkit::new(ffmpeg, ffprobe)),
        })
    }
}
