//! Video reference model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a YouTube video ID.
pub const VIDEO_ID_LEN: usize = 11;

/// A validated 11-character YouTube video ID.
///
/// Only ASCII alphanumerics, `-` and `_` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Validate and wrap a raw ID.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() == VIDEO_ID_LEN && raw.chars().all(is_video_id_char) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Check if a character may appear in a video ID.
pub(crate) fn is_video_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VideoId {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s).ok_or_else(|| format!("invalid video id: {}", s))
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}
