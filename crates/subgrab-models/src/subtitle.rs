//! Subtitle cue and selection models.

use serde::{Deserialize, Serialize};

use crate::language::language_name;

/// One timed subtitle line.
///
/// Times are seconds rendered with exactly three decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    pub start: String,
    pub dur: String,
    pub text: String,
}

impl Cue {
    /// Build a cue from fractional-second timings.
    pub fn new(start: f64, duration: f64, text: impl Into<String>) -> Self {
        Self {
            start: format_seconds(start),
            dur: format_seconds(duration),
            text: text.into(),
        }
    }
}

fn format_seconds(seconds: f64) -> String {
    format!("{:.3}", seconds)
}

/// The track picked for a video, with its normalized cues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResult {
    /// Language code of the chosen track
    pub language: String,
    /// Display name from the static table, or the code itself
    pub language_name: String,
    /// Cues in track order
    pub subtitles: Vec<Cue>,
}

impl SelectionResult {
    pub fn new(language: impl Into<String>, subtitles: Vec<Cue>) -> Self {
        let language = language.into();
        let language_name = language_name(&language).to_string();
        Self {
            language,
            language_name,
            subtitles,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subtitles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.subtitles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_times_have_three_decimals() {
        let cue = Cue::new(12.5, 3.0, "hello");
        assert_eq!(cue.start, "12.500");
        assert_eq!(cue.dur, "3.000");

        let cue = Cue::new(0.0, 1.23456, "x");
        assert_eq!(cue.start, "0.000");
        assert_eq!(cue.dur, "1.235");
    }

    #[test]
    fn test_cue_text_is_untouched() {
        let cue = Cue::new(1.0, 1.0, "  [Music] &amp;\n");
        assert_eq!(cue.text, "  [Music] &amp;\n");
    }

    #[test]
    fn test_selection_result_resolves_name() {
        let result = SelectionResult::new("fr", vec![Cue::new(0.0, 1.0, "bonjour")]);
        assert_eq!(result.language_name, "Français");
        assert_eq!(result.len(), 1);

        let result = SelectionResult::new("sv", Vec::new());
        assert_eq!(result.language_name, "sv");
        assert!(result.is_empty());
    }

    #[test]
    fn test_selection_result_json_shape() {
        let result = SelectionResult::new("en", vec![Cue::new(1.5, 2.25, "hi")]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "language": "en",
                "languageName": "English",
                "subtitles": [{"start": "1.500", "dur": "2.250", "text": "hi"}]
            })
        );
    }
}
