//! Static language tables.

use serde::Serialize;

/// Language used when the caller does not ask for one, and the
/// secondary preference in the track fallback chain.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Display names for the language codes the UI knows about.
pub const LANGUAGE_NAMES: [(&str, &str); 16] = [
    ("en", "English"),
    ("es", "Español"),
    ("pt", "Português"),
    ("fr", "Français"),
    ("de", "Deutsch"),
    ("it", "Italiano"),
    ("ja", "日本語"),
    ("ko", "한국어"),
    ("zh", "中文"),
    ("ru", "Русский"),
    ("ar", "العربية"),
    ("hi", "हिन्दी"),
    ("nl", "Nederlands"),
    ("pl", "Polski"),
    ("tr", "Türkçe"),
    ("vi", "Tiếng Việt"),
];

/// A language code with its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

/// Languages offered in the UI selector.
pub const COMMON_LANGUAGES: [Language; 10] = [
    Language { code: "en", name: "English" },
    Language { code: "es", name: "Español" },
    Language { code: "pt", name: "Português" },
    Language { code: "fr", name: "Français" },
    Language { code: "de", name: "Deutsch" },
    Language { code: "it", name: "Italiano" },
    Language { code: "ja", name: "日本語" },
    Language { code: "ko", name: "한국어" },
    Language { code: "zh", name: "中文" },
    Language { code: "ru", name: "Русский" },
];

/// Resolve a display name for a language code.
///
/// Unknown codes are returned unchanged.
pub fn language_name(code: &str) -> &str {
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}
