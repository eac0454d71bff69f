//! Shared data models for Subgrab.
//!
//! This crate provides Serde-serializable types for:
//! - Validated YouTube video references
//! - Subtitle cues and selection results
//! - The static language-name tables
//!
//! It also hosts the URL resolver used by the HTTP layer.

pub mod language;
pub mod subtitle;
pub mod utils;
pub mod video;

// Re-export common types
pub use language::{language_name, Language, COMMON_LANGUAGES, DEFAULT_LANGUAGE, LANGUAGE_NAMES};
pub use subtitle::{Cue, SelectionResult};
pub use utils::{extract_video_id, is_valid_reference};
pub use video::VideoId;
