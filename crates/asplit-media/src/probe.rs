//! FFprobe audio information.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{MediaError, MediaResult};

/// Audio file information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioInfo {
    /// Duration in seconds
    pub duration: f64,
    /// Audio codec
    pub codec: String,
    /// File size in bytes
    pub size: u64,
    /// Bitrate in bits/second
    pub bitrate: u64,
}

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
    size: Option<String>,
    bit_rate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    codec_name: Option<String>,
}

/// Probe an audio file for information.
pub async fn probe_audio(ffprobe: &Path, path: &Path) -> MediaResult<AudioInfo> {
    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    let output = Command::new(ffprobe)
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::ffprobe_failed(
            "FFprobe failed",
            Some(String::from_utf8_lossy(&output.stderr).to_string()),
        ));
    }

    parse_probe_output(&output.stdout)
}

/// Get audio duration in seconds.
pub async fn probe_duration(ffprobe: &Path, path: &Path) -> MediaResult<f64> {
    let info = probe_audio(ffprobe, path).await?;
    Ok(info.duration)
}

/// Parse FFprobe's JSON output into [`AudioInfo`].
fn parse_probe_output(bytes: &[u8]) -> MediaResult<AudioInfo> {
    let probe: FfprobeOutput = serde_json::from_slice(bytes)?;

    // Find audio stream
    let audio_stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type == "audio")
        .ok_or_else(|| MediaError::InvalidAudio("No audio stream found".to_string()))?;

    // Parse duration
    let duration = probe
        .format
        .duration
        .as_ref()
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| MediaError::InvalidAudio("Missing duration".to_string()))?;

    // Parse size
    let size = probe
        .format
        .size
        .as_ref()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);

    // Parse bitrate
    let bitrate = probe
        .format
        .bit_rate
        .as_ref()
        .and_then(|b| b.parse::<u64>().ok())
        .unwrap_or(0);

    Ok(AudioInfo {
        duration,
        codec: audio_stream.codec_name.clone().unwrap_or_default(),
        size,
        bitrate,
    })
}
