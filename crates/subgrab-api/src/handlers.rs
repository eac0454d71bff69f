//! Request handlers.

pub mod health;
pub mod languages;
pub mod subtitles;

pub use health::*;
pub use languages::*;
pub use subtitles::*;
