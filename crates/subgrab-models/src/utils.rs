//! YouTube URL resolution and validation.
//!
//! Two independent checks are exposed:
//! - [`is_valid_reference`] decides whether input looks like a YouTube link
//!   or a bare video ID at all
//! - [`extract_video_id`] pulls the 11-character ID out of it
//!
//! The two pattern sets differ slightly on edge cases (unanchored host
//! matching in extraction, anchored shape matching in validation). Callers
//! run validation first, then extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::video::VideoId;

/// ID embedded after a recognized path form, anywhere in the input.
static EMBEDDED_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)([a-zA-Z0-9_-]{11})",
    )
    .expect("embedded id pattern is valid")
});

/// Input that is nothing but an ID.
static BARE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-zA-Z0-9_-]{11})$").expect("bare id pattern is valid"));

/// Full link shape with optional scheme and `www.`; trailing input is allowed.
static YOUTUBE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(https?://)?(www\.)?(youtube\.com/(watch\?v=|embed/|v/)|youtu\.be/)[a-zA-Z0-9_-]{11}",
    )
    .expect("youtube url pattern is valid")
});

/// Extract a YouTube video ID from a URL or bare ID.
///
/// Supports:
/// - youtube.com/watch?v=VIDEO_ID
/// - youtu.be/VIDEO_ID
/// - youtube.com/embed/VIDEO_ID
/// - youtube.com/v/VIDEO_ID
/// - VIDEO_ID alone
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    [&*EMBEDDED_ID, &*BARE_ID]
        .iter()
        .find_map(|pattern| pattern.captures(input))
        .and_then(|caps| caps.get(1))
        .and_then(|m| VideoId::parse(m.as_str()))
}

/// Check whether input is shaped like a YouTube link or a bare video ID.
pub fn is_valid_reference(input: &str) -> bool {
    YOUTUBE_URL.is_match(input) || BARE_ID.is_match(input)
}
