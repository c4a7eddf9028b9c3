//! Runtime configuration.
//!
//! An [`AnalyzerConfig`] is assembled once at startup, from an optional YAML
//! file overlaid with CLI flags and environment variables, and is read-only
//! for the rest of the process.
//!
//! ```yaml
//! news_api_key: "..."
//! generation_api_key: "..."   # optional
//! max_articles: 5
//! search_endpoint: https://newsapi.org/v2/everything
//! ```

use crate::cli::Cli;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};

/// Key value shipped in sample configs; treated the same as no key at all.
pub const PLACEHOLDER_NEWS_API_KEY: &str = "your_newsapi_key_here";

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://newsapi.org/v2/everything";
pub const DEFAULT_MAX_ARTICLES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Credential for the news search API.
    pub news_api_key: Option<String>,
    /// Credential for the external summary generator. Its presence switches
    /// the summary to the placeholder digest.
    pub generation_api_key: Option<String>,
    /// Upper bound on articles analyzed per query.
    pub max_articles: usize,
    pub search_endpoint: String,
    pub language: String,
    pub sort_by: String,
    pub user_agent: String,
    /// Per-request timeout. `None` keeps the transport default.
    pub request_timeout_secs: Option<u64>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            news_api_key: None,
            generation_api_key: None,
            max_articles: DEFAULT_MAX_ARTICLES,
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            language: "en".to_string(),
            sort_by: "relevancy".to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout_secs: None,
        }
    }
}

impl AnalyzerConfig {
    /// Parse a YAML config document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML config file from disk.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let config = Self::from_yaml(&raw)?;
        info!(max_articles = config.max_articles, "Loaded configuration file");
        Ok(config)
    }

    /// Overlay values given on the command line (or via environment).
    pub fn with_cli_overrides(mut self, cli: &Cli) -> Self {
        if let Some(key) = &cli.news_api_key {
            self.news_api_key = Some(key.clone());
        }
        if let Some(key) = &cli.generation_api_key {
            self.generation_api_key = Some(key.clone());
        }
        if let Some(n) = cli.max_articles {
            self.max_articles = n;
        }
        self
    }

    /// The search key, if one is usable.
    pub fn search_key(&self) -> Option<&str> {
        self.news_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != PLACEHOLDER_NEWS_API_KEY)
    }

    /// Whether a non-blank generation credential is configured.
    pub fn has_generation_key(&self) -> bool {
        self.generation_api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.max_articles, 5);
        assert_eq!(config.search_endpoint, DEFAULT_SEARCH_ENDPOINT);
        assert_eq!(config.language, "en");
        assert_eq!(config.sort_by, "relevancy");
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AnalyzerConfig::from_yaml("news_api_key: abc123\nmax_articles: 3\n").unwrap();
        assert_eq!(config.search_key(), Some("abc123"));
        assert_eq!(config.max_articles, 3);
        assert_eq!(config.language, "en");
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = AnalyzerConfig::from_yaml("max_articles: [not, a, number]").unwrap_err();
        assert!(matches!(err, crate::error::Error::Config(_)));
    }

    #[test]
    fn test_missing_and_placeholder_keys_are_unusable() {
        let mut config = AnalyzerConfig::default();
        assert_eq!(config.search_key(), None);

        config.news_api_key = Some("   ".to_string());
        assert_eq!(config.search_key(), None);

        config.news_api_key = Some(PLACEHOLDER_NEWS_API_KEY.to_string());
        assert_eq!(config.search_key(), None);

        config.news_api_key = Some(" real ".to_string());
        assert_eq!(config.search_key(), Some("real"));
    }

    #[test]
    fn test_generation_key_presence() {
        let mut config = AnalyzerConfig::default();
        assert!(!config.has_generation_key());
        config.generation_api_key = Some(String::new());
        assert!(!config.has_generation_key());
        config.generation_api_key = Some("g-key".to_string());
        assert!(config.has_generation_key());
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let file = AnalyzerConfig::from_yaml("news_api_key: from-file\nmax_articles: 9\n").unwrap();
        let cli = Cli::parse_from([
            "news_bias_analyzer",
            "elections",
            "--news-api-key",
            "from-cli",
            "--max-articles",
            "2",
        ]);
        let config = file.with_cli_overrides(&cli);
        assert_eq!(config.search_key(), Some("from-cli"));
        assert_eq!(config.max_articles, 2);
    }
}
