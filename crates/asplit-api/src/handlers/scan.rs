//! Folder scan handler.

use axum::Json;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use asplit_models::{is_supported_audio, AudioFileEntry};

use crate::error::{ApiError, ApiResult};

/// Folder scan request.
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub folder_path: String,
}

/// Folder scan response.
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub files: Vec<AudioFileEntry>,
}

/// List audio files in a folder.
///
/// Only the top level is scanned, matching the extensions `.mp3`, `.wav`,
/// `.opus`, `.flac`, `.m4a`, `.ogg` case-insensitively. Entries are sorted
/// by name so the listing is stable across calls.
pub async fn scan_folder(Json(request): Json<ScanRequest>) -> ApiResult<Json<ScanResponse>> {
    let folder = PathBuf::from(&request.folder_path);

    let is_dir = tokio::fs::metadata(&folder)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !is_dir {
        return Err(ApiError::bad_request("Invalid folder path"));
    }

    let mut entries = tokio::fs::read_dir(&folder)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to read directory: {e}")))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to read directory entry: {e}")))?
    {
        let path = entry.path();
        if !is_supported_audio(&path) {
            continue;
        }

        // Unreadable or vanished entries are skipped rather than failing
        // the whole scan.
        let Ok(metadata) = entry.metadata().await else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }

        files.push(AudioFileEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: path.to_string_lossy().into_owned(),
            size: metadata.len(),
        });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Json(ScanResponse { files }))
}
