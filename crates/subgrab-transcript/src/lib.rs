//! Transcript directory client and caption track selection.
//!
//! This crate provides:
//! - The `TranscriptDirectory` abstraction over a captions provider
//! - A YouTube implementation (InnerTube player + json3 timed text)
//! - The track selector with its language fallback chain

pub mod config;
pub mod directory;
pub mod error;
pub mod selector;
pub mod track;
pub mod youtube;

pub use config::YoutubeConfig;
pub use directory::TranscriptDirectory;
pub use error::{TranscriptError, TranscriptResult};
pub use selector::{choose_track, TranscriptSelector};
pub use track::{RawCue, TranscriptList, TranscriptTrack};
pub use youtube::YoutubeDirectory;
