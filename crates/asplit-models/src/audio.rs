//! Audio file entries and supported formats.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// File extensions the scanner recognizes as audio, lowercase without dots.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["mp3", "wav", "opus", "flac", "m4a", "ogg"];

/// Check whether a path has a supported audio extension (case-insensitive).
pub fn is_supported_audio(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.iter().any(|s| *s == ext)
        })
        .unwrap_or(false)
}

/// One row of a folder scan result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFileEntry {
    /// File name without directory components.
    pub name: String,
    /// Full path to the file.
    pub path: String,
    /// File size in bytes.
    pub size: u64,
}
