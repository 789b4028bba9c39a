//! Audio split handler.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use asplit_media::{split_file, SplitConfig};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Message returned when the detector finds nothing to split at.
pub const NO_SILENCE_MESSAGE: &str =
    "No silence detected. File might be too loud or threshold too low.";

fn default_silence_threshold() -> f64 {
    -30.0
}

fn default_silence_duration() -> f64 {
    1.0
}

fn default_padding() -> f64 {
    0.5
}

fn default_min_segment_length() -> f64 {
    20.0
}

fn default_use_subfolder() -> bool {
    true
}

/// Split request.
#[derive(Debug, Deserialize)]
pub struct SplitRequest {
    pub file_path: String,
    /// Noise floor in dB for silence detection.
    #[serde(default = "default_silence_threshold")]
    pub silence_threshold: f64,
    /// Minimum silence duration in seconds worth splitting at.
    #[serde(default = "default_silence_duration")]
    pub silence_duration: f64,
    /// Seconds kept on either side of a silence boundary.
    #[serde(default = "default_padding")]
    pub padding: f64,
    /// Advisory minimum output segment length in seconds.
    #[serde(default = "default_min_segment_length")]
    pub min_segment_length: f64,
    /// Route output files into a subfolder named after the source.
    #[serde(default = "default_use_subfolder")]
    pub use_subfolder: bool,
}

/// Split response.
#[derive(Debug, Serialize)]
pub struct SplitResponse {
    pub message: String,
    pub splits: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
}

/// Split one audio file at silence boundaries.
pub async fn split_audio(
    State(state): State<AppState>,
    Json(request): Json<SplitRequest>,
) -> ApiResult<Json<SplitResponse>> {
    validate(&request)?;

    let config = SplitConfig::default()
        .with_threshold_db(request.silence_threshold)
        .with_min_silence(request.silence_duration)
        .with_padding(request.padding)
        .with_min_segment_length(request.min_segment_length)
        .with_subfolder(request.use_subfolder);

    let input = PathBuf::from(&request.file_path);
    let outcome = split_file(state.toolkit.as_ref(), &input, &config).await?;

    if outcome.is_unsplit() {
        return Ok(Json(SplitResponse {
            message: NO_SILENCE_MESSAGE.to_string(),
            splits: 0,
            files: None,
        }));
    }

    Ok(Json(SplitResponse {
        message: "Split complete".to_string(),
        splits: outcome.files.len(),
        files: Some(
            outcome
                .files
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        ),
    }))
}

fn validate(request: &SplitRequest) -> ApiResult<()> {
    let numeric = [
        ("silence_threshold", request.silence_threshold),
        ("silence_duration", request.silence_duration),
        ("padding", request.padding),
        ("min_segment_length", request.min_segment_length),
    ];
    for (name, value) in numeric {
        if !value.is_finite() {
            return Err(ApiError::bad_request(format!("{name} must be finite")));
        }
    }

    if request.silence_duration <= 0.0 {
        return Err(ApiError::bad_request("silence_duration must be positive"));
    }
    if request.padding < 0.0 {
        return Err(ApiError::bad_request("padding must not be negative"));
    }
    if request.min_segment_length < 0.0 {
        return Err(ApiError::bad_request(
            "min_segment_length must not be negative",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: SplitRequest =
            serde_json::from_str(r#"{"file_path": "/music/tape.mp3"}"#).unwrap();

        assert_eq!(request.file_path, "/music/tape.mp3");
        assert!((request.silence_threshold - (-30.0)).abs() < f64::EPSILON);
        assert!((request.silence_duration - 1.0).abs() < f64::EPSILON);
        assert!((request.padding - 0.5).abs() < f64::EPSILON);
        assert!((request.min_segment_length - 20.0).abs() < f64::EPSILON);
        assert!(request.use_subfolder);
    }

    #[test]
    fn test_request_overrides() {
        let request: SplitRequest = serde_json::from_str(
            r#"{
                "file_path": "/music/tape.mp3",
                "silence_threshold": -42.5,
                "silence_duration": 0.8,
                "padding": 0.25,
                "min_segment_length": 10,
                "use_subfolder": false
            }"#,
        )
        .unwrap();

        assert!((request.silence_threshold - (-42.5)).abs() < f64::EPSILON);
        assert!((request.silence_duration - 0.8).abs() < f64::EPSILON);
        assert!((request.padding - 0.25).abs() < f64::EPSILON);
        assert!((request.min_segment_length - 10.0).abs() < f64::EPSILON);
        assert!(!request.use_subfolder);
    }

    #[test]
    fn test_validation_rejects_bad_params() {
        let mut request: SplitRequest =
            serde_json::from_str(r#"{"file_path": "/music/tape.mp3"}"#).unwrap();

        request.silence_duration = 0.0;
        assert!(validate(&request).is_err());

        request.silence_duration = 1.0;
        request.padding = -0.5;
        assert!(validate(&request).is_err());

        request.padding = 0.5;
        request.min_segment_length = f64::NAN;
        assert!(validate(&request).is_err());
    }

    #[test]
    fn test_no_silence_response_omits_files() {
        let response = SplitResponse {
            message: NO_SILENCE_MESSAGE.to_string(),
            splits: 0,
            files: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["splits"], 0);
        assert!(json.get("files").is_none());
    }

    #[test]
    fn test_split_response_shape() {
        let response = SplitResponse {
            message: "Split complete".to_string(),
            splits: 2,
            files: Some(vec![
                "/music/tape/tape_part_001.mp3".to_string(),
                "/music/tape/tape_part_002.mp3".to_string(),
            ]),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["splits"], 2);
        assert_eq!(json["files"].as_array().unwrap().len(), 2);
    }
}
