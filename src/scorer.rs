//! Lexical bias and sentiment scoring.
//!
//! Sentiment comes from VADER, a lexicon and rule based analyzer. The bias
//! score is a plain presence count of opinion-signaling words: each word in
//! [`OPINION_WORDS`] contributes at most one point, matched as a substring of
//! the lowercased text.

use crate::models::{ArticleRecord, BiasRecord, Sentiment};
use tracing::{debug, instrument};
use vader_sentiment::SentimentIntensityAnalyzer;

pub const OPINION_WORDS: [&str; 6] = ["must", "should", "never", "always", "clearly", "obviously"];

/// Maximum preview length, in characters.
pub const PREVIEW_CHARS: usize = 300;
pub const TRUNCATION_MARKER: &str = "...";

/// Count how many distinct opinion words occur in `text`.
///
/// Matching is case-insensitive and by substring, so `"Mustard"` counts
/// for `"must"`. Repeats do not add to the score.
///
/// # Returns
///
/// A value in `0..=OPINION_WORDS.len()`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(bias_score("We must always act clearly"), 3);
/// ```
pub fn bias_score(text: &str) -> u32 {
    let lowered = text.to_lowercase();
    OPINION_WORDS.iter().filter(|w| lowered.contains(*w)).count() as u32
}

/// First [`PREVIEW_CHARS`] characters of `text`, marked when cut.
///
/// # Returns
///
/// `text` unchanged when it has at most [`PREVIEW_CHARS`] characters,
/// otherwise its first [`PREVIEW_CHARS`] characters followed by
/// [`TRUNCATION_MARKER`].
pub fn content_preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// Scores articles for sentiment and opinion-word bias.
///
/// Holds the VADER analyzer so its lexicon is loaded once per run.
pub struct BiasScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl std::fmt::Debug for BiasScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BiasScorer").finish_non_exhaustive()
    }
}

impl Default for BiasScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl BiasScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// VADER polarity of `text`. Empty text scores all zeros.
    pub fn sentiment(&self, text: &str) -> Sentiment {
        if text.trim().is_empty() {
            return Sentiment::default();
        }
        let scores = self.analyzer.polarity_scores(text);
        let get = |key: &str| scores.get(key).copied().unwrap_or(0.0);
        Sentiment {
            negative: get("neg"),
            neutral: get("neu"),
            positive: get("pos"),
            compound: get("compound"),
        }
    }

    /// Score one article.
    pub fn score_article(&self, article: &ArticleRecord) -> BiasRecord {
        let text = article.text();
        let record = BiasRecord {
            title: article.title.clone(),
            url: article.url.clone(),
            bias_score: bias_score(text),
            sentiment: self.sentiment(text),
            content_preview: content_preview(text),
        };
        debug!(
            url = %record.url,
            bias_score = record.bias_score,
            compound = record.sentiment.compound,
            "Scored article"
        );
        record
    }

    /// Score every article, preserving order.
    ///
    /// # Arguments
    ///
    /// * `articles` - Extracted articles; missing content counts as empty text
    ///
    /// # Returns
    ///
    /// One [`BiasRecord`] per input article, in the same order.
    #[instrument(level = "info", skip_all, fields(count = articles.len()))]
    pub fn score(&self, articles: &[ArticleRecord]) -> Vec<BiasRecord> {
        articles.iter().map(|a| self.score_article(a)).collect()
    }
}
