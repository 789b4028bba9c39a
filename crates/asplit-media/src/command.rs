//! FFmpeg command builder and runner.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// Builder for FFmpeg commands.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    /// Input file path
    input: PathBuf,
    /// Output file path (or `-` for a null sink)
    output: PathBuf,
    /// Input arguments (before -i)
    input_args: Vec<String>,
    /// Output arguments (after -i)
    output_args: Vec<String>,
    /// Whether to overwrite output
    overwrite: bool,
    /// Log level
    log_level: String,
}

impl FfmpegCommand {
    /// Create a new FFmpeg command.
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            input_args: Vec::new(),
            output_args: Vec::new(),
            overwrite: true,
            log_level: "error".to_string(),
        }
    }

    /// Add an input argument (before -i).
    pub fn input_arg(mut self, arg: impl Into<String>) -> Self {
        self.input_args.push(arg.into());
        self
    }

    /// Add an output argument (after -i).
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Set seek position (before input).
    pub fn seek(self, seconds: f64) -> Self {
        self.input_arg("-ss").input_arg(format!("{:.3}", seconds))
    }

    /// Set stop position (before input).
    pub fn until(self, seconds: f64) -> Self {
        self.input_arg("-to").input_arg(format!("{:.3}", seconds))
    }

    /// Set audio filter.
    pub fn audio_filter(self, filter: impl Into<String>) -> Self {
        self.output_arg("-af").output_arg(filter)
    }

    /// Copy all streams without re-encoding.
    pub fn stream_copy(self) -> Self {
        self.output_arg("-c").output_arg("copy")
    }

    /// Set output container format.
    pub fn format(self, fmt: impl Into<String>) -> Self {
        self.output_arg("-f").output_arg(fmt)
    }

    /// Set log level.
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Build the command arguments.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        // Overwrite flag
        if self.overwrite {
            args.push("-y".to_string());
        }

        // Log level
        args.push("-v".to_string());
        args.push(self.log_level.clone());

        // Input args
        args.extend(self.input_args.clone());

        // Input file
        args.push("-i".to_string());
        args.push(self.input.to_string_lossy().to_string());

        // Output args
        args.extend(self.output_args.clone());

        // Output file
        args.push(self.output.to_string_lossy().to_string());

        args
    }
}

/// Runner for FFmpeg commands against an injected binary path.
pub struct FfmpegRunner {
    program: PathBuf,
}

impl FfmpegRunner {
    /// Create a runner for the given ffmpeg binary.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run an FFmpeg command, discarding its diagnostic output.
    pub async fn run(&self, cmd: &FfmpegCommand) -> MediaResult<()> {
        self.run_capturing_stderr(cmd).await.map(|_| ())
    }

    /// Run an FFmpeg command and return its stderr text.
    ///
    /// FFmpeg writes all diagnostics (including `silencedetect` output) to
    /// stderr, so the captured text is what filter-based callers parse.
    pub async fn run_capturing_stderr(&self, cmd: &FfmpegCommand) -> MediaResult<String> {
        let args = cmd.build_args();
        debug!(
            "Running FFmpeg: {} {}",
            self.program.display(),
            args.join(" ")
        );

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            Ok(stderr)
        } else {
            Err(MediaError::ffmpeg_failed(
                "FFmpeg exited with non-zero status",
                Some(stderr),
                output.status.code(),
            ))
        }
    }
}

/// Check if FFmpeg is available on the PATH.
pub fn check_ffmpeg() -> MediaResult<PathBuf> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)
}

/// Check if FFprobe is available on the PATH.
pub fn check_ffprobe() -> MediaResult<PathBuf> {
    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)
}
