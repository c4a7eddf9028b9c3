//! The four-stage analysis pipeline: normalize → fetch → score → summarize.

use crate::config::AnalyzerConfig;
use crate::error::{Error, Result};
use crate::fetcher::fetch_articles;
use crate::models::AnalysisReport;
use crate::normalize::normalize_query;
use crate::page_source::PageSource;
use crate::scorer::BiasScorer;
use crate::summary::generate_summary;
use chrono::Utc;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Runs analyses against a fixed configuration and page source.
#[derive(Debug)]
pub struct Pipeline<S> {
    config: AnalyzerConfig,
    source: S,
    scorer: BiasScorer,
}

impl<S: PageSource> Pipeline<S> {
    pub fn new(config: AnalyzerConfig, source: S) -> Self {
        Self {
            config,
            source,
            scorer: BiasScorer::new(),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze `topic`.
    ///
    /// # Errors
    ///
    /// Only validation failures are returned, and always before any network
    /// call: [`Error::EmptyTopic`] for a blank topic and
    /// [`Error::MissingSearchKey`] when no usable search key is configured.
    /// A search that finds nothing yields a report with no articles.
    #[instrument(level = "info", skip(self))]
    pub async fn run(&self, topic: &str) -> Result<AnalysisReport> {
        if topic.trim().is_empty() {
            return Err(Error::EmptyTopic);
        }
        let api_key = self.config.search_key().ok_or(Error::MissingSearchKey)?;

        let t0 = Instant::now();
        let query = normalize_query(topic);
        info!(%query, "Normalized topic");

        let articles = fetch_articles(&self.source, &self.config, &query, api_key).await;
        if articles.is_empty() {
            warn!(%query, "No articles found");
        }

        let records = self.scorer.score(&articles);
        let summary = generate_summary(&records, self.config.has_generation_key());

        info!(
            articles = records.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Analysis complete"
        );
        Ok(AnalysisReport {
            topic: topic.to_string(),
            query,
            generated_at: Utc::now(),
            articles: records,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page_source::fake::FakePageSource;
    use crate::summary::{NO_ARTICLES_MESSAGE, PLACEHOLDER_SUMMARY};

    const ENDPOINT: &str = "https://search.example.com/v2/everything";

    fn config() -> AnalyzerConfig {
        AnalyzerConfig {
            news_api_key: Some("key".to_string()),
            search_endpoint: ENDPOINT.to_string(),
            ..Default::default()
        }
    }

    fn three_hits() -> String {
        serde_json::json!({
            "articles": [
                {"title": "A", "url": "https://a.example.com/1", "description": "about a"},
                {"title": "B", "url": "https://b.example.com/2", "description": "about b"},
                {"title": "C", "url": "https://c.example.com/3"}
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_empty_topic_rejected_before_io() {
        let pipeline = Pipeline::new(config(), FakePageSource::new());
        assert!(matches!(pipeline.run("   ").await, Err(Error::EmptyTopic)));
        assert_eq!(pipeline.source.request_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_key_rejected_before_io() {
        let pipeline = Pipeline::new(AnalyzerConfig::default(), FakePageSource::new());
        assert!(matches!(pipeline.run("elections").await, Err(Error::MissingSearchKey)));
        assert_eq!(pipeline.source.request_count(), 0);
    }

    #[tokio::test]
    async fn test_search_failure_gives_no_articles_summary() {
        let source = FakePageSource::new().with_prefix(ENDPOINT, 401, r#"{"status":"error"}"#);
        let report = Pipeline::new(config(), source).run("Climate Change!!").await.unwrap();
        assert_eq!(report.query, "climate change");
        assert!(report.is_empty());
        assert_eq!(report.summary, NO_ARTICLES_MESSAGE);
    }

    #[tokio::test]
    async fn test_failed_extraction_keeps_batch_intact() {
        let source = FakePageSource::new()
            .with_prefix(ENDPOINT, 200, &three_hits())
            .with_page("https://a.example.com/1", 404, "<p>We must always act clearly</p>")
            .with_page("https://c.example.com/3", 404, "<div>no paragraphs</div>");
        let report = Pipeline::new(config(), source).run("topic").await.unwrap();

        assert_eq!(report.articles.len(), 3);
        assert_eq!(report.articles[0].bias_score, 3);
        assert_eq!(report.articles[1].content_preview, "about b");
        assert_eq!(report.articles[2].content_preview, "");
        assert_eq!(report.summary, "We must always act clearly about b ");
    }

    #[tokio::test]
    async fn test_generation_key_uses_placeholder() {
        let config = AnalyzerConfig {
            generation_api_key: Some("g".to_string()),
            ..config()
        };
        let source = FakePageSource::new().with_prefix(ENDPOINT, 200, &three_hits());
        let report = Pipeline::new(config, source).run("topic").await.unwrap();
        assert_eq!(report.articles.len(), 3);
        assert_eq!(report.summary, PLACEHOLDER_SUMMARY);
    }
}
