//! Transcript tracks and listings.

use crate::error::{TranscriptError, TranscriptResult};

/// One available caption track for a video.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptTrack {
    pub video_id: String,
    /// Language code as reported by the directory (e.g. "en", "pt-BR")
    pub language_code: String,
    /// Directory-provided language label
    pub language: String,
    /// Auto-generated (ASR) rather than manually created
    pub is_generated: bool,
    /// Location the directory fetches cues from
    pub base_url: String,
}

/// A raw cue as returned by the directory.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCue {
    pub start: f64,
    pub duration: f64,
    pub text: String,
}

/// All tracks available for a video.
///
/// Iteration yields manually created tracks before auto-generated ones,
/// each group in listing order.
#[derive(Debug, Clone, Default)]
pub struct TranscriptList {
    pub video_id: String,
    tracks: Vec<TranscriptTrack>,
}

impl TranscriptList {
    pub fn new(video_id: impl Into<String>, mut tracks: Vec<TranscriptTrack>) -> Self {
        // Stable sort keeps listing order within each group.
        tracks.sort_by_key(|t| t.is_generated);
        Self {
            video_id: video_id.into(),
            tracks,
        }
    }

    /// First manually created track matching any of the codes, tried in order.
    pub fn find_manually_created(&self, language_codes: &[&str]) -> TranscriptResult<&TranscriptTrack> {
        self.find(language_codes, false)
    }

    /// First auto-generated track matching any of the codes, tried in order.
    pub fn find_generated(&self, language_codes: &[&str]) -> TranscriptResult<&TranscriptTrack> {
        self.find(language_codes, true)
    }

    fn find(&self, language_codes: &[&str], generated: bool) -> TranscriptResult<&TranscriptTrack> {
        language_codes
            .iter()
            .find_map(|code| {
                self.tracks
                    .iter()
                    .find(|t| t.is_generated == generated && t.language_code == *code)
            })
            .ok_or_else(|| TranscriptError::no_transcript_found(&self.video_id, language_codes))
    }

    /// First manually created track, or the first generated one if none.
    pub fn first(&self) -> Option<&TranscriptTrack> {
        self.tracks.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranscriptTrack> {
        self.tracks.iter()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl<'a> IntoIterator for &'a TranscriptList {
    type Item = &'a TranscriptTrack;
    type IntoIter = std::slice::Iter<'a, TranscriptTrack>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

#[cfg(test)]
pub(crate) fn track(language_code: &str, is_generated: bool) -> TranscriptTrack {
    TranscriptTrack {
        video_id: "dQw4w9WgXcQ".to_string(),
        language_code: language_code.to_string(),
        language: language_code.to_string(),
        is_generated,
        base_url: format!("https://example.com/{}/{}", language_code, is_generated),
    }
}
