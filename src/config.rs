//! Runtime configuration
//!
//! Credentials are supplied by the caller (the CLI reads them from flags or
//! environment variables). Everything else has defaults matching the Brazilian
//! catalog the application was built for.

use std::time::Duration;

/// Base URL of the TMDB v3 API
pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Base URL of the YouTube Data API v3
pub const YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Settings shared by the metadata clients and resolvers
#[derive(Debug, Clone)]
pub struct Config {
    /// TMDB read access token, sent as a bearer credential
    pub bearer_token: String,
    /// YouTube Data API key. Without it, video metadata mining is skipped.
    pub youtube_api_key: Option<String>,
    pub tmdb_base_url: String,
    pub youtube_base_url: String,
    /// Language requested for all localized catalog text
    pub language: String,
    /// Language used when no trailer exists in the primary language
    pub fallback_language: String,
    /// Country used for watch providers and catalog filtering
    pub region: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Config {
    /// Creates a configuration with the given credentials and default settings
    pub fn new(bearer_token: impl Into<String>, youtube_api_key: Option<String>) -> Self {
        Self {
            bearer_token: bearer_token.into(),
            youtube_api_key,
            tmdb_base_url: TMDB_BASE_URL.to_string(),
            youtube_base_url: YOUTUBE_BASE_URL.to_string(),
            language: "pt-BR".to_string(),
            fallback_language: "en-US".to_string(),
            region: "BR".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("token", None);
        assert_eq!(config.bearer_token, "token");
        assert_eq!(config.language, "pt-BR");
        assert_eq!(config.fallback_language, "en-US");
        assert_eq!(config.region, "BR");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.youtube_api_key.is_none());
    }
}
