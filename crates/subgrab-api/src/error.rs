//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use subgrab_models::VideoId;
use thiserror::Error;

use crate::config::is_production_environment;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("URL required")]
    UrlRequired,

    #[error("Invalid URL")]
    InvalidUrl,

    #[error("ID not found")]
    IdNotFound,

    #[error("No subtitles")]
    NoSubtitles { video_id: VideoId },

    #[error("Server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn no_subtitles(video_id: VideoId) -> Self {
        Self::NoSubtitles { video_id }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UrlRequired | ApiError::InvalidUrl | ApiError::IdNotFound => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NoSubtitles { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short error kind shown to clients.
    fn kind(&self) -> &'static str {
        match self {
            ApiError::UrlRequired => "URL required",
            ApiError::InvalidUrl => "Invalid URL",
            ApiError::IdNotFound => "ID not found",
            ApiError::NoSubtitles { .. } => "No subtitles",
            ApiError::Internal(_) => "Server error",
        }
    }

    /// Friendly message shown to end users.
    fn message(&self) -> String {
        let production = std::env::var("ENVIRONMENT")
            .map(|v| is_production_environment(&v))
            .unwrap_or(false);
        self.message_for(production)
    }

    fn message_for(&self, production: bool) -> String {
        match self {
            ApiError::UrlRequired => "Please provide a YouTube link".to_string(),
            ApiError::InvalidUrl => "The provided link is not a valid YouTube link".to_string(),
            ApiError::IdNotFound => "Could not extract the video ID".to_string(),
            ApiError::NoSubtitles { .. } => "This video has no subtitles available.".to_string(),
            ApiError::Internal(detail) => {
                // Don't expose internal error details in production
                if production {
                    "An internal error occurred".to_string()
                } else {
                    format!("An error occurred: {}", detail)
                }
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    video_id: Option<VideoId>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.kind(),
            message: self.message(),
            video_id: match self {
                ApiError::NoSubtitles { video_id } => Some(video_id),
                _ => None,
            },
        };

        (status, Json(body)).into_response()
    }
}
