//! Transcript directory error types.

use thiserror::Error;

pub type TranscriptResult<T> = Result<T, TranscriptError>;

/// Failures reported by a transcript directory.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("Transcripts are disabled for video {0}")]
    TranscriptsDisabled(String),

    #[error("No transcript found for video {video_id} in languages {languages:?}")]
    NoTranscriptFound {
        video_id: String,
        languages: Vec<String>,
    },

    #[error("Video unavailable: {0}")]
    VideoUnavailable(String),

    #[error("Request blocked by YouTube for video {0}")]
    RequestBlocked(String),

    #[error("Video {0} is age restricted")]
    AgeRestricted(String),

    #[error("Video {video_id} is unplayable: {reason}")]
    VideoUnplayable { video_id: String, reason: String },

    #[error("Video {0} requires a PO token to fetch captions")]
    PoTokenRequired(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Failed to parse YouTube response: {0}")]
    Parse(String),
}

impl TranscriptError {
    pub fn no_transcript_found(video_id: impl Into<String>, languages: &[&str]) -> Self {
        Self::NoTranscriptFound {
            video_id: video_id.into(),
            languages: languages.iter().map(|l| l.to_string()).collect(),
        }
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Short tag for logs and metric labels.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::TranscriptsDisabled(_) => "transcripts_disabled",
            Self::NoTranscriptFound { .. } => "no_transcript_found",
            Self::VideoUnavailable(_) => "video_unavailable",
            Self::RequestBlocked(_) => "request_blocked",
            Self::AgeRestricted(_) => "age_restricted",
            Self::VideoUnplayable { .. } => "video_unplayable",
            Self::PoTokenRequired(_) => "po_token_required",
            Self::Http(_) => "http_error",
            Self::Parse(_) => "parse_error",
        }
    }
}

impl From<reqwest::Error> for TranscriptError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}
