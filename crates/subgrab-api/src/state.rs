//! Application state.

use std::sync::Arc;

use subgrab_transcript::{TranscriptDirectory, TranscriptResult, TranscriptSelector, YoutubeDirectory};

use crate::config::ApiConfig;

/// Shared application state.
///
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub selector: TranscriptSelector,
}

impl AppState {
    /// Create state around an existing transcript directory.
    pub fn new(config: ApiConfig, directory: Arc<dyn TranscriptDirectory>) -> Self {
        Self {
            config,
            selector: TranscriptSelector::new(directory),
        }
    }

    /// Create state backed by the YouTube directory configured from the environment.
    pub fn from_env(config: ApiConfig) -> TranscriptResult<Self> {
        let directory = YoutubeDirectory::from_env()?;
        Ok(Self::new(config, Arc::new(directory)))
    }
}
