//! Caption track selection.
//!
//! Tracks are chosen in a fixed priority order, first hit wins:
//! 1. manually created, preferred language
//! 2. auto-generated, preferred language
//! 3. manually created, English (only when the preference is not English)
//! 4. auto-generated, English (same condition)
//! 5. any track, manually created ones before auto-generated
//!
//! Every directory failure is absorbed here and reported as `None`. The
//! reason survives only in logs and the lookup counter.

use std::sync::Arc;

use metrics::counter;
use subgrab_models::{Cue, SelectionResult, VideoId, DEFAULT_LANGUAGE};
use tracing::{info, warn};

use crate::directory::TranscriptDirectory;
use crate::error::{TranscriptError, TranscriptResult};
use crate::track::{TranscriptList, TranscriptTrack};

/// Counter of selector outcomes, labelled `found` or by failure reason.
pub const TRANSCRIPT_LOOKUPS_TOTAL: &str = "subgrab_transcript_lookups_total";

/// Picks and fetches one caption track per request.
#[derive(Clone)]
pub struct TranscriptSelector {
    directory: Arc<dyn TranscriptDirectory>,
}

impl TranscriptSelector {
    pub fn new(directory: Arc<dyn TranscriptDirectory>) -> Self {
        Self { directory }
    }

    /// Select a track for the video and return its normalized cues.
    ///
    /// Returns `None` when no track exists or any directory call fails.
    pub async fn select_transcript(
        &self,
        video_id: &VideoId,
        preferred_lang: &str,
    ) -> Option<SelectionResult> {
        match self.try_select(video_id, preferred_lang).await {
            Ok(result) => {
                record_lookup("found");
                info!(
                    video_id = %video_id,
                    language = %result.language,
                    cues = result.len(),
                    "Transcript selected"
                );
                Some(result)
            }
            Err(e) => {
                record_lookup(e.reason());
                warn!(
                    video_id = %video_id,
                    preferred_lang = %preferred_lang,
                    reason = e.reason(),
                    error = %e,
                    "No transcript available"
                );
                None
            }
        }
    }

    async fn try_select(
        &self,
        video_id: &VideoId,
        preferred_lang: &str,
    ) -> TranscriptResult<SelectionResult> {
        let list = self.directory.list(video_id).await?;
        let track = choose_track(&list, preferred_lang)
            .ok_or_else(|| TranscriptError::no_transcript_found(video_id.as_str(), &[preferred_lang]))?;

        let cues = self
            .directory
            .fetch(track)
            .await?
            .into_iter()
            .map(|raw| Cue::new(raw.start, raw.duration, raw.text))
            .collect();

        Ok(SelectionResult::new(track.language_code.clone(), cues))
    }
}

/// Apply the fallback chain to a listing.
pub fn choose_track<'a>(list: &'a TranscriptList, preferred_lang: &str) -> Option<&'a TranscriptTrack> {
    find_in_language(list, preferred_lang)
        .or_else(|| {
            if preferred_lang != DEFAULT_LANGUAGE {
                find_in_language(list, DEFAULT_LANGUAGE)
            } else {
                None
            }
        })
        .or_else(|| list.first())
}

/// Manually created first, then auto-generated.
fn find_in_language<'a>(list: &'a TranscriptList, lang: &str) -> Option<&'a TranscriptTrack> {
    list.find_manually_created(&[lang])
        .or_else(|_| list.find_generated(&[lang]))
        .ok()
}

fn record_lookup(outcome: &'static str) {
    let labels = [("outcome", outcome.to_string())];
    counter!(TRANSCRIPT_LOOKUPS_TOTAL, &labels).increment(1);
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::track::{track, RawCue};

    fn list(tracks: Vec<TranscriptTrack>) -> TranscriptList {
        TranscriptList::new("dQw4w9WgXcQ", tracks)
    }

    fn video_id() -> VideoId {
        VideoId::parse("dQw4w9WgXcQ").unwrap()
    }

    /// In-memory directory that records which track was fetched.
    struct StaticDirectory {
        listing: Result<Vec<TranscriptTrack>, &'static str>,
        cues: Vec<RawCue>,
        fail_fetch: bool,
        fetched: Mutex<Vec<String>>,
    }

    impl StaticDirectory {
        fn with_tracks(tracks: Vec<TranscriptTrack>) -> Self {
            Self {
                listing: Ok(tracks),
                cues: vec![
                    RawCue { start: 0.0, duration: 1.5, text: "first".to_string() },
                    RawCue { start: 1.5, duration: 2.25, text: "second".to_string() },
                ],
                fail_fetch: false,
                fetched: Mutex::new(Vec::new()),
            }
        }

        fn disabled() -> Self {
            Self {
                listing: Err("disabled"),
                ..Self::with_tracks(Vec::new())
            }
        }
    }

    #[async_trait]
    impl TranscriptDirectory for StaticDirectory {
        async fn list(&self, video_id: &VideoId) -> TranscriptResult<TranscriptList> {
            match &self.listing {
                Ok(tracks) => Ok(TranscriptList::new(video_id.as_str(), tracks.clone())),
                Err(_) => Err(TranscriptError::TranscriptsDisabled(video_id.to_string())),
            }
        }

        async fn fetch(&self, track: &TranscriptTrack) -> TranscriptResult<Vec<RawCue>> {
            self.fetched.lock().unwrap().push(track.base_url.clone());
            if self.fail_fetch {
                return Err(TranscriptError::http("HTTP 500: Internal Server Error"));
            }
            Ok(self.cues.clone())
        }
    }

    #[test]
    fn test_prefers_manual_in_preferred_language() {
        let list = list(vec![track("es", true), track("es", false), track("en", false)]);
        let chosen = choose_track(&list, "es").unwrap();
        assert_eq!(chosen.language_code, "es");
        assert!(!chosen.is_generated);
    }

    #[test]
    fn test_generated_preferred_beats_manual_english() {
        let list = list(vec![track("en", false), track("es", true)]);
        let chosen = choose_track(&list, "es").unwrap();
        assert_eq!(chosen.language_code, "es");
        assert!(chosen.is_generated);
    }

    #[test]
    fn test_falls_back_to_english_manual_then_generated() {
        let list1 = list(vec![track("fr", false), track("en", true), track("en", false)]);
        let chosen = choose_track(&list1, "de").unwrap();
        assert_eq!(chosen.language_code, "en");
        assert!(!chosen.is_generated);

        let list2 = list(vec![track("fr", false), track("en", true)]);
        let chosen = choose_track(&list2, "de").unwrap();
        assert_eq!(chosen.language_code, "en");
        assert!(chosen.is_generated);
    }

    #[test]
    fn test_any_track_fallback_prefers_manual() {
        let list = list(vec![track("fr", true), track("ja", false)]);
        let chosen = choose_track(&list, "de").unwrap();
        assert_eq!(chosen.language_code, "ja");
        assert!(!chosen.is_generated);

        // English preference skips the English re-check and goes straight to any.
        let chosen = choose_track(&list, "en").unwrap();
        assert_eq!(chosen.language_code, "ja");
    }

    #[test]
    fn test_any_track_fallback_uses_listing_order_within_group() {
        let list = list(vec![track("fr", true), track("it", true)]);
        let chosen = choose_track(&list, "de").unwrap();
        assert_eq!(chosen.language_code, "fr");
        assert!(chosen.is_generated);
    }

    #[test]
    fn test_empty_listing_selects_nothing() {
        assert!(choose_track(&list(Vec::new()), "en").is_none());
    }

    #[tokio::test]
    async fn test_select_transcript_formats_cues() {
        let directory = Arc::new(StaticDirectory::with_tracks(vec![track("fr", true)]));
        let selector = TranscriptSelector::new(directory.clone());

        let result = selector.select_transcript(&video_id(), "de").await.unwrap();
        assert_eq!(result.language, "fr");
        assert_eq!(result.language_name, "Français");
        assert_eq!(result.subtitles.len(), 2);
        assert_eq!(result.subtitles[0], Cue::new(0.0, 1.5, "first"));
        assert_eq!(result.subtitles[1].start, "1.500");
        assert_eq!(result.subtitles[1].dur, "2.250");
        assert_eq!(
            *directory.fetched.lock().unwrap(),
            vec!["https://example.com/fr/true".to_string()]
        );
    }

    #[tokio::test]
    async fn test_select_transcript_unknown_language_name_is_code() {
        let directory = Arc::new(StaticDirectory::with_tracks(vec![track("sv", false)]));
        let selector = TranscriptSelector::new(directory);

        let result = selector.select_transcript(&video_id(), "sv").await.unwrap();
        assert_eq!(result.language_name, "sv");
    }

    #[tokio::test]
    async fn test_select_transcript_absorbs_listing_failure() {
        let selector = TranscriptSelector::new(Arc::new(StaticDirectory::disabled()));
        assert!(selector.select_transcript(&video_id(), "en").await.is_none());
    }

    #[tokio::test]
    async fn test_select_transcript_absorbs_fetch_failure() {
        let mut directory = StaticDirectory::with_tracks(vec![track("en", false)]);
        directory.fail_fetch = true;
        let selector = TranscriptSelector::new(Arc::new(directory));
        assert!(selector.select_transcript(&video_id(), "en").await.is_none());
    }

    #[tokio::test]
    async fn test_select_transcript_with_no_tracks() {
        let selector = TranscriptSelector::new(Arc::new(StaticDirectory::with_tracks(Vec::new())));
        assert!(selector.select_transcript(&video_id(), "en").await.is_none());
    }
}
