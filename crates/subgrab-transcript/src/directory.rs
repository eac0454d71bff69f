//! Transcript directory abstraction.

use async_trait::async_trait;
use subgrab_models::VideoId;

use crate::error::TranscriptResult;
use crate::track::{RawCue, TranscriptList, TranscriptTrack};

/// A service that lists caption tracks for a video and fetches their cues.
#[async_trait]
pub trait TranscriptDirectory: Send + Sync {
    /// List every track available for a video.
    async fn list(&self, video_id: &VideoId) -> TranscriptResult<TranscriptList>;

    /// Fetch the cues of one track, in track order.
    async fn fetch(&self, track: &TranscriptTrack) -> TranscriptResult<Vec<RawCue>>;
}
