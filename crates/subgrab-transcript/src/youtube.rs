//! YouTube-backed transcript directory.
//!
//! Listing goes through the watch page (to obtain the InnerTube API key) and
//! the InnerTube `player` endpoint, which reports the caption tracks. Cues are
//! fetched from each track's `baseUrl` in the `json3` timed-text format.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use subgrab_models::VideoId;
use tracing::{debug, info};

use crate::config::YoutubeConfig;
use crate::directory::TranscriptDirectory;
use crate::error::{TranscriptError, TranscriptResult};
use crate::track::{RawCue, TranscriptList, TranscriptTrack};

static INNERTUBE_API_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).expect("api key pattern is valid")
});

/// InnerTube client identity used for the player call.
const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
const INNERTUBE_CLIENT_VERSION: &str = "20.10.38";

// ============================================================================
// InnerTube player response
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: Option<PlayabilityStatus>,
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    #[serde(default)]
    status: String,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    name: Option<TrackName>,
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackName {
    #[serde(default)]
    runs: Vec<TextRun>,
    simple_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextRun {
    text: String,
}

impl TrackName {
    fn text(&self) -> Option<&str> {
        self.runs
            .first()
            .map(|r| r.text.as_str())
            .or(self.simple_text.as_deref())
    }
}

// ============================================================================
// json3 timed text
// ============================================================================

#[derive(Debug, Deserialize)]
struct TimedText {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimedTextEvent {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    segs: Option<Vec<TimedTextSegment>>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSegment {
    #[serde(default)]
    utf8: String,
}

// ============================================================================
// Client
// ============================================================================

/// Transcript directory backed by YouTube's public endpoints.
pub struct YoutubeDirectory {
    config: YoutubeConfig,
    client: Client,
}

impl YoutubeDirectory {
    /// Create a new YouTube directory client.
    pub fn new(config: YoutubeConfig) -> TranscriptResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language)
                .map_err(|e| TranscriptError::http(format!("Invalid Accept-Language: {}", e)))?,
        );

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self { config, client })
    }

    /// Create a client configured from environment variables.
    pub fn from_env() -> TranscriptResult<Self> {
        Self::new(YoutubeConfig::from_env())
    }

    async fn fetch_watch_page(&self, video_id: &VideoId) -> TranscriptResult<String> {
        let url = format!("{}/watch", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("v", video_id.as_str())])
            .send()
            .await?;

        check_status(&response, video_id.as_str())?;
        Ok(response.text().await?)
    }

    async fn fetch_player(&self, video_id: &VideoId, api_key: &str) -> TranscriptResult<PlayerResponse> {
        let url = format!("{}/youtubei/v1/player", self.config.base_url);
        let body = serde_json::json!({
            "context": {
                "client": {
                    "clientName": INNERTUBE_CLIENT_NAME,
                    "clientVersion": INNERTUBE_CLIENT_VERSION
                }
            },
            "videoId": video_id.as_str()
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        check_status(&response, video_id.as_str())?;
        response
            .json::<PlayerResponse>()
            .await
            .map_err(|e| TranscriptError::parse(format!("player response: {}", e)))
    }
}

#[async_trait]
impl TranscriptDirectory for YoutubeDirectory {
    async fn list(&self, video_id: &VideoId) -> TranscriptResult<TranscriptList> {
        let html = self.fetch_watch_page(video_id).await?;
        let api_key = extract_innertube_api_key(&html, video_id.as_str())?;
        let player = self.fetch_player(video_id, &api_key).await?;
        let list = parse_player_response(video_id.as_str(), player)?;

        debug!(
            video_id = %video_id,
            tracks = list.len(),
            "Listed caption tracks"
        );
        Ok(list)
    }

    async fn fetch(&self, track: &TranscriptTrack) -> TranscriptResult<Vec<RawCue>> {
        if track.base_url.contains("&exp=xpe") {
            return Err(TranscriptError::PoTokenRequired(track.video_id.clone()));
        }

        let url = json3_url(&track.base_url);
        let response = self.client.get(&url).send().await?;
        check_status(&response, &track.video_id)?;

        let timed_text = response
            .json::<TimedText>()
            .await
            .map_err(|e| TranscriptError::parse(format!("timed text: {}", e)))?;
        let cues = cues_from_timed_text(timed_text);

        info!(
            video_id = %track.video_id,
            language = %track.language_code,
            generated = track.is_generated,
            cues = cues.len(),
            "Fetched caption track"
        );
        Ok(cues)
    }
}

fn check_status(response: &Response, video_id: &str) -> TranscriptResult<()> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(TranscriptError::RequestBlocked(video_id.to_string()));
    }
    if !status.is_success() {
        return Err(TranscriptError::http(format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown error")
        )));
    }
    Ok(())
}

fn extract_innertube_api_key(html: &str, video_id: &str) -> TranscriptResult<String> {
    if html.contains("class=\"g-recaptcha\"") {
        return Err(TranscriptError::RequestBlocked(video_id.to_string()));
    }

    INNERTUBE_API_KEY
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| TranscriptError::parse(format!("no InnerTube API key on watch page of {}", video_id)))
}

fn parse_player_response(video_id: &str, player: PlayerResponse) -> TranscriptResult<TranscriptList> {
    assert_playable(video_id, player.playability_status.as_ref())?;

    let caption_tracks = player
        .captions
        .and_then(|c| c.player_captions_tracklist_renderer)
        .map(|r| r.caption_tracks)
        .unwrap_or_default();

    if caption_tracks.is_empty() {
        return Err(TranscriptError::TranscriptsDisabled(video_id.to_string()));
    }

    let tracks = caption_tracks
        .into_iter()
        .map(|caption| TranscriptTrack {
            video_id: video_id.to_string(),
            language: caption
                .name
                .as_ref()
                .and_then(TrackName::text)
                .unwrap_or(&caption.language_code)
                .to_string(),
            is_generated: caption.kind.as_deref() == Some("asr"),
            base_url: caption.base_url.replace("&fmt=srv3", ""),
            language_code: caption.language_code,
        })
        .collect();

    Ok(TranscriptList::new(video_id, tracks))
}

fn assert_playable(video_id: &str, status: Option<&PlayabilityStatus>) -> TranscriptResult<()> {
    let Some(status) = status else {
        return Ok(());
    };
    if status.status == "OK" {
        return Ok(());
    }

    let reason = status.reason.as_deref().unwrap_or("");
    match status.status.as_str() {
        "LOGIN_REQUIRED" if reason.contains("not a bot") => {
            Err(TranscriptError::RequestBlocked(video_id.to_string()))
        }
        "LOGIN_REQUIRED" if reason.contains("inappropriate") => {
            Err(TranscriptError::AgeRestricted(video_id.to_string()))
        }
        "ERROR" if reason.contains("unavailable") => {
            Err(TranscriptError::VideoUnavailable(video_id.to_string()))
        }
        _ => Err(TranscriptError::VideoUnplayable {
            video_id: video_id.to_string(),
            reason: reason.to_string(),
        }),
    }
}

fn json3_url(base_url: &str) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{}{}fmt=json3", base_url, separator)
}

fn cues_from_timed_text(timed_text: TimedText) -> Vec<RawCue> {
    timed_text
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs?.into_iter().map(|s| s.utf8).collect();
            if text.trim().is_empty() {
                return None;
            }
            Some(RawCue {
                start: event.t_start_ms as f64 / 1000.0,
                duration: event.d_duration_ms as f64 / 1000.0,
                text,
            })
        })
        .collect()
}
