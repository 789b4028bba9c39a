//! FFmpeg CLI wrapper and silence-driven segment planning.
//!
//! This crate provides:
//! - A builder/runner for ffmpeg invocations with injected binary paths
//! - FFprobe-based duration/metadata probing
//! - Silence detection via the `silencedetect` filter
//! - The pure silence-to-segment planner and the split orchestrator

pub mod command;
pub mod cut;
pub mod error;
pub mod probe;
pub mod silence;
pub mod split;
pub mod toolkit;

pub use error::{MediaError, MediaResult};
pub use probe::AudioInfo;
pub use split::{plan_segments, split_file, SplitConfig, SplitOutcome};
pub use toolkit::{AudioToolkit, FfmpegToolkit};
