//! Subtitle lookup handler.

use std::borrow::Cow;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use subgrab_models::{extract_video_id, is_valid_reference, Cue, VideoId, DEFAULT_LANGUAGE};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Subtitle lookup request.
///
/// Fields stay untyped so that falsy values (`0`, `false`, `[]`) read as a
/// missing link and a non-string language still selects a track.
#[derive(Debug, Deserialize)]
pub struct SubtitlesRequest {
    #[serde(default)]
    pub url: Value,
    #[serde(default)]
    pub lang: Value,
}

impl SubtitlesRequest {
    /// Parse a raw request body.
    ///
    /// Bodies that are not a JSON object are server errors, not validation
    /// errors.
    pub fn from_body(body: &[u8]) -> ApiResult<Self> {
        serde_json::from_slice(body).map_err(|e| ApiError::internal(e.to_string()))
    }

    /// The link to resolve, or `None` when it is absent or falsy.
    ///
    /// Any other non-string value cannot be validated and is a server error.
    pub fn url(&self) -> ApiResult<Option<&str>> {
        match &self.url {
            Value::String(s) if !s.is_empty() => Ok(Some(s)),
            value if is_falsy(value) => Ok(None),
            other => Err(ApiError::internal(format!("url must be a string, got {}", other))),
        }
    }

    /// Preferred language, `en` when absent or null.
    pub fn lang(&self) -> Cow<'_, str> {
        match &self.lang {
            Value::Null => Cow::Borrowed(DEFAULT_LANGUAGE),
            Value::String(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Subtitle lookup response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitlesResponse {
    pub success: bool,
    pub video_id: VideoId,
    pub language: String,
    pub language_name: String,
    pub subtitles: Vec<Cue>,
    pub count: usize,
}

/// Resolve a YouTube link and return the best caption track's cues.
pub async fn fetch_subtitles(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<SubtitlesResponse>> {
    let request = SubtitlesRequest::from_body(&body)?;
    let lang = request.lang();

    info!(url = %request.url, lang = %lang, "New subtitles request");

    let url = request.url()?.ok_or(ApiError::UrlRequired)?;

    if !is_valid_reference(url) {
        return Err(ApiError::InvalidUrl);
    }

    let video_id = extract_video_id(url).ok_or(ApiError::IdNotFound)?;
    info!(video_id = %video_id, "Resolved video ID");

    let result = match state.selector.select_transcript(&video_id, &lang).await {
        Some(result) if !result.is_empty() => result,
        _ => {
            info!(video_id = %video_id, "No subtitles found");
            return Err(ApiError::no_subtitles(video_id));
        }
    };

    info!(
        video_id = %video_id,
        language = %result.language,
        count = result.len(),
        "Subtitles resolved"
    );

    let count = result.len();
    Ok(Json(SubtitlesResponse {
        success: true,
        video_id,
        language: result.language,
        language_name: result.language_name,
        subtitles: result.subtitles,
        count,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = SubtitlesRequest::from_body(b"{}").unwrap();
        assert_eq!(request.url().unwrap(), None);
        assert_eq!(request.lang(), "en");

        let request = SubtitlesRequest::from_body(br#"{"url": "dQw4w9WgXcQ", "lang": "es"}"#).unwrap();
        assert_eq!(request.url().unwrap(), Some("dQw4w9WgXcQ"));
        assert_eq!(request.lang(), "es");
    }

    #[test]
    fn test_null_fields_fall_back() {
        let request = SubtitlesRequest::from_body(br#"{"url": null, "lang": null}"#).unwrap();
        assert_eq!(request.url().unwrap(), None);
        assert_eq!(request.lang(), "en");
    }

    #[test]
    fn test_falsy_url_reads_as_missing() {
        let bodies: [&[u8]; 5] = [
            br#"{"url": ""}"#,
            br#"{"url": 0}"#,
            br#"{"url": 0.0}"#,
            br#"{"url": false}"#,
            br#"{"url": []}"#,
        ];
        for body in bodies {
            let request = SubtitlesRequest::from_body(body).unwrap();
            assert_eq!(request.url().unwrap(), None);
        }
    }

    #[test]
    fn test_truthy_non_string_url_is_internal() {
        let request = SubtitlesRequest::from_body(br#"{"url": 42}"#).unwrap();
        assert!(matches!(request.url(), Err(ApiError::Internal(_))));

        let request = SubtitlesRequest::from_body(br#"{"url": ["dQw4w9WgXcQ"]}"#).unwrap();
        assert!(matches!(request.url(), Err(ApiError::Internal(_))));
    }

    #[test]
    fn test_non_string_lang_is_kept() {
        let request = SubtitlesRequest::from_body(br#"{"url": "dQw4w9WgXcQ", "lang": 5}"#).unwrap();
        assert_eq!(request.lang(), "5");
    }

    #[test]
    fn test_malformed_body_is_internal() {
        assert!(matches!(
            SubtitlesRequest::from_body(b"not json"),
            Err(ApiError::Internal(_))
        ));
        assert!(matches!(
            SubtitlesRequest::from_body(b"[1, 2]"),
            Err(ApiError::Internal(_))
        ));
    }
}
