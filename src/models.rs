//! Data models flowing through the analysis pipeline.
//!
//! This module defines the records handed from one stage to the next:
//! - [`RawArticleRef`]: An entry from the news search response
//! - [`ArticleRecord`]: A search hit with its extracted body text
//! - [`BiasRecord`]: A scored article ready for presentation
//! - [`AnalysisReport`]: Everything produced for one topic
//!
//! Every value lives for a single pipeline run; nothing is persisted between
//! runs apart from the optional JSON export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single article as listed by the news search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArticleRef {
    pub title: String,
    pub url: String,
    /// The API-provided blurb, used as last-resort content.
    pub description: Option<String>,
}

/// A search hit after body extraction.
///
/// `content` stays `None` until the extractor has run. After extraction it
/// may still be an empty string when every strategy failed and the search
/// entry had no description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    pub title: String,
    pub url: String,
    pub content: Option<String>,
}

impl ArticleRecord {
    /// The body text, treating missing content as empty.
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// Four-component VADER polarity measurement.
///
/// `negative`, `neutral` and `positive` are proportions in `[0, 1]`;
/// `compound` is the normalized aggregate in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct Sentiment {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    pub compound: f64,
}

/// A scored article.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BiasRecord {
    pub title: String,
    pub url: String,
    /// Number of distinct opinion words present in the text.
    pub bias_score: u32,
    pub sentiment: Sentiment,
    /// At most 300 characters of the body, with `...` appended when cut.
    pub content_preview: String,
}

/// The result of one pipeline run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisReport {
    /// The topic exactly as the user typed it.
    pub topic: String,
    /// The normalized search query.
    pub query: String,
    pub generated_at: DateTime<Utc>,
    pub articles: Vec<BiasRecord>,
    pub summary: String,
}

impl AnalysisReport {
    /// True when the search produced nothing to analyze.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Mean bias score across articles, if any.
    pub fn average_bias(&self) -> Option<f64> {
        if self.articles.is_empty() {
            return None;
        }
        let total: u32 = self.articles.iter().map(|a| a.bias_score).sum();
        Some(f64::from(total) / self.articles.len() as f64)
    }

    /// Mean compound sentiment across articles, if any.
    pub fn average_compound(&self) -> Option<f64> {
        if self.articles.is_empty() {
            return None;
        }
        let total: f64 = self.articles.iter().map(|a| a.sentiment.compound).sum();
        Some(total / self.articles.len() as f64)
    }
}
