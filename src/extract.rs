//! Article body extraction with ordered fallback strategies.
//!
//! Given an article URL, [`ContentExtractor`] tries each [`Strategy`] in
//! order and keeps the result of the first one that does not fail:
//!
//! | Order | Strategy | Method |
//! |-------|----------|--------|
//! | 1 | [`Strategy::Readability`] | Readability scoring over the downloaded page |
//! | 2 | [`Strategy::Paragraphs`] | Every `<p>` in document order, space-joined |
//! | 3 | fallback text | The search API's description, verbatim |
//!
//! A page that downloads fine but has no article text is a success with an
//! empty body; only errors advance the chain. Failures are logged and swallowed. The extractor always returns a string,
//! so a single dead link or malformed page never aborts the batch.

use crate::error::{Error, Result};
use crate::page_source::PageSource;
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::io::Cursor;
use tracing::{debug, info, instrument, warn};
use url::Url;

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("static selector"));

/// One way of turning a URL into body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Article-aware extraction. Requires a success status.
    Readability,
    /// Generic paragraph scraping. Scrapes whatever body the server sent.
    Paragraphs,
}

impl Strategy {
    pub const ORDERED: [Strategy; 2] = [Strategy::Readability, Strategy::Paragraphs];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Readability => "readability",
            Strategy::Paragraphs => "paragraphs",
        }
    }

    /// Run this strategy against `url`, downloading the page through `source`.
    ///
    /// # Arguments
    ///
    /// * `source` - Where the page is downloaded from
    /// * `url` - The article URL
    ///
    /// # Returns
    ///
    /// The extracted body text. An empty string is a valid result: a page
    /// that downloads fine but carries no article text yields `""`.
    ///
    /// # Errors
    ///
    /// Fails on a transport error, on a non-2xx status for
    /// [`Strategy::Readability`], or when Readability cannot parse the page.
    /// [`Strategy::Paragraphs`] only fails when the download itself fails.
    pub async fn run<S: PageSource>(&self, source: &S, url: &str) -> Result<String> {
        let page = source.fetch(url).await?;
        match self {
            Strategy::Readability => {
                if !page.is_success() {
                    return Err(Error::Status {
                        status: page.status,
                        url: url.to_string(),
                    });
                }
                readable_text(&page.body, url)
            }
            Strategy::Paragraphs => Ok(paragraph_text(&page.body)),
        }
    }
}

/// Extract the main article text from `html` using Readability.
///
/// # Arguments
///
/// * `html` - The downloaded page
/// * `url` - The page URL, used to resolve relative links
///
/// # Returns
///
/// The trimmed article text, possibly empty.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] for an unparseable `url` and
/// [`Error::Extraction`] when Readability rejects the document.
pub fn readable_text(html: &str, url: &str) -> Result<String> {
    let base = Url::parse(url)?;
    let mut reader = Cursor::new(html.as_bytes());
    let product = readability::extractor::extract(&mut reader, &base)
        .map_err(|e| Error::Extraction(format!("readability: {e}")))?;
    Ok(product.text.trim().to_string())
}

/// Concatenate the text of every `<p>` element, in document order.
///
/// Each paragraph's text nodes are joined as-is and paragraphs are
/// separated by a single space. A page without paragraphs gives `""`.
pub fn paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    document
        .select(&PARAGRAPH)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs the strategy chain for each article.
#[derive(Debug)]
pub struct ContentExtractor<'a, S> {
    source: &'a S,
    strategies: Vec<Strategy>,
}

impl<'a, S: PageSource> ContentExtractor<'a, S> {
    /// Extractor with the standard strategy order.
    pub fn new(source: &'a S) -> Self {
        Self::with_strategies(source, Strategy::ORDERED.to_vec())
    }

    /// Extractor trying `strategies` in the given order.
    pub fn with_strategies(source: &'a S, strategies: Vec<Strategy>) -> Self {
        Self { source, strategies }
    }

    /// Body text for `url`, or `fallback` when every strategy fails.
    ///
    /// # Arguments
    ///
    /// * `url` - The article URL
    /// * `fallback` - The search API's description, used verbatim (or `""`
    ///   when absent) once every strategy has returned an error
    ///
    /// # Returns
    ///
    /// Always a string. Errors from individual strategies are logged and
    /// never propagated.
    #[instrument(level = "info", skip_all, fields(%url))]
    pub async fn extract(&self, url: &str, fallback: Option<&str>) -> String {
        for strategy in &self.strategies {
            match strategy.run(self.source, url).await {
                Ok(text) => {
                    info!(strategy = strategy.name(), chars = text.chars().count(), "Extracted article body");
                    debug!(preview = %truncate_for_log(&text, 120), "Body preview");
                    return text;
                }
                Err(e) => {
                    warn!(strategy = strategy.name(), error = %e, "Extraction strategy failed; trying next");
                }
            }
        }
        let fallback = fallback.unwrap_or_default();
        warn!(chars = fallback.chars().count(), "All strategies failed; using description");
        fallback.to_string()
    }
}
