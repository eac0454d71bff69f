//! YouTube client configuration.

/// Desktop browser user agent; YouTube serves the consent-free watch page to it.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// YouTube directory configuration.
#[derive(Debug, Clone)]
pub struct YoutubeConfig {
    /// Base URL for watch pages and the InnerTube API
    pub base_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Accept-Language header sent with every request
    pub accept_language: String,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.youtube.com".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "en-US".to_string(),
        }
    }
}

impl YoutubeConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("YOUTUBE_BASE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            user_agent: std::env::var("YOUTUBE_USER_AGENT").unwrap_or(defaults.user_agent),
            accept_language: std::env::var("YOUTUBE_ACCEPT_LANGUAGE")
                .unwrap_or(defaults.accept_language),
        }
    }

    /// Config pointing at a different host, for tests and proxies.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = YoutubeConfig::default();
        assert_eq!(config.base_url, "https://www.youtube.com");
        assert_eq!(config.accept_language, "en-US");
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let config = YoutubeConfig::with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
    }
}
