//! News search and per-article body retrieval.
//!
//! One search request is issued for the normalized topic. The first
//! `max_articles` hits are then processed one at a time, each handed to the
//! [`ContentExtractor`]. A failed search is an empty result, never an error.

use crate::config::AnalyzerConfig;
use crate::error::{Error, Result};
use crate::extract::ContentExtractor;
use crate::models::{ArticleRecord, RawArticleRef};
use crate::page_source::PageSource;
use crate::utils::{redact_secret, truncate_for_log};
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
}

/// Build the search request URL for `query`.
///
/// # Arguments
///
/// * `config` - Supplies the endpoint, language and sort order
/// * `query` - The normalized topic
/// * `api_key` - The search credential, sent as `apiKey`
///
/// # Returns
///
/// The endpoint with all parameters URL-encoded. The URL carries the
/// credential, so it must never be logged as-is.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] when the configured endpoint does not parse.
pub fn search_url(config: &AnalyzerConfig, query: &str, api_key: &str) -> Result<Url> {
    let url = Url::parse_with_params(
        &config.search_endpoint,
        &[
            ("q", query),
            ("language", config.language.as_str()),
            ("sortBy", config.sort_by.as_str()),
            ("apiKey", api_key),
        ],
    )?;
    Ok(url)
}

/// Decode a search response body into article references.
///
/// # Arguments
///
/// * `body` - The JSON body of a successful search
/// * `limit` - How many leading entries of the `articles` list to consider
///
/// # Returns
///
/// References built from the first `limit` entries, in API order. Entries
/// among those without a URL are dropped, so the result may be shorter than
/// `limit` even when the API sent more. A missing title becomes `""`.
///
/// # Errors
///
/// Returns [`Error::Serialization`] when the body is not a search response.
pub fn parse_search_response(body: &str, limit: usize) -> Result<Vec<RawArticleRef>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response
        .articles
        .into_iter()
        .take(limit)
        .filter_map(|hit| {
            let url = hit.url.filter(|u| !u.trim().is_empty())?;
            Some(RawArticleRef {
                title: hit.title.unwrap_or_default(),
                url,
                description: hit.description,
            })
        })
        .collect())
}

/// Describe a failed search request without leaking the credential.
///
/// Transport errors render the full request URL, `apiKey` included.
pub fn search_failure_message(e: &Error, api_key: &str) -> String {
    redact_secret(&e.to_string(), api_key)
}

/// Search for `query` and return the referenced articles, in API order.
///
/// # Arguments
///
/// * `source` - Where the search request is sent
/// * `config` - Endpoint, language, sort order and `max_articles`
/// * `query` - The normalized topic
/// * `api_key` - The search credential
///
/// # Returns
///
/// At most `config.max_articles` references. An unreachable endpoint, a
/// status other than 200, or an undecodable body all give an empty list.
#[instrument(level = "info", skip(source, config, api_key))]
pub async fn search_articles<S: PageSource>(
    source: &S,
    config: &AnalyzerConfig,
    query: &str,
    api_key: &str,
) -> Vec<RawArticleRef> {
    let url = match search_url(config, query, api_key) {
        Ok(u) => u,
        Err(e) => {
            error!(endpoint = %config.search_endpoint, error = %e, "Invalid search endpoint");
            return Vec::new();
        }
    };

    let page = match source.fetch(url.as_str()).await {
        Ok(p) => p,
        Err(e) => {
            error!(error = %search_failure_message(&e, api_key), "Search request failed");
            return Vec::new();
        }
    };

    if page.status != 200 {
        warn!(
            status = page.status,
            body = %truncate_for_log(&page.body, 200),
            "Search returned non-success status; treating as no results"
        );
        return Vec::new();
    }

    match parse_search_response(&page.body, config.max_articles) {
        Ok(refs) => {
            info!(count = refs.len(), "Search returned articles");
            refs
        }
        Err(e) => {
            warn!(error = %e, body = %truncate_for_log(&page.body, 200), "Undecodable search response");
            Vec::new()
        }
    }
}

/// Search for `query` and extract each hit's body, sequentially.
///
/// # Arguments
///
/// * `source` - Used for the search and for every article download
/// * `config` - Search settings and the article bound
/// * `query` - The normalized topic
/// * `api_key` - The search credential
///
/// # Returns
///
/// One [`ArticleRecord`] per search hit, in API order, each with
/// `content` set. Extraction failures never shorten the list.
#[instrument(level = "info", skip(source, config, api_key))]
pub async fn fetch_articles<S: PageSource>(
    source: &S,
    config: &AnalyzerConfig,
    query: &str,
    api_key: &str,
) -> Vec<ArticleRecord> {
    let refs = search_articles(source, config, query, api_key).await;
    let extractor = ContentExtractor::new(source);

    let articles: Vec<ArticleRecord> = stream::iter(refs)
        .then(|r| {
            let extractor = &extractor;
            async move {
                let content = extractor.extract(&r.url, r.description.as_deref()).await;
                debug!(url = %r.url, chars = content.chars().count(), "Fetched article");
                ArticleRecord {
                    title: r.title,
                    url: r.url,
                    content: Some(content),
                }
            }
        })
        .collect()
        .await;

    info!(count = articles.len(), "Fetched article contents");
    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page_source::fake::FakePageSource;

    const ENDPOINT: &str = "https://search.example.com/v2/everything";

    fn config(max: usize) -> AnalyzerConfig {
        AnalyzerConfig {
            news_api_key: Some("key".to_string()),
            max_articles: max,
            search_endpoint: ENDPOINT.to_string(),
            ..Default::default()
        }
    }

    fn search_body(n: usize) -> String {
        let hits: Vec<_> = (1..=n)
            .map(|i| {
                serde_json::json!({
                    "title": format!("Story {i}"),
                    "url": format!("https://site{i}.example.com/story"),
                    "description": format!("Description {i}"),
                })
            })
            .collect();
        serde_json::json!({ "status": "ok", "totalResults": n, "articles": hits }).to_string()
    }

    #[test]
    fn test_search_url_parameters() {
        let url = search_url(&config(5), "climate change", "secret&key").unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "climate change".to_string()),
                ("language".to_string(), "en".to_string()),
                ("sortBy".to_string(), "relevancy".to_string()),
                ("apiKey".to_string(), "secret&key".to_string()),
            ]
        );
        assert!(url.as_str().starts_with(ENDPOINT));
    }

    #[test]
    fn test_parse_search_response_limits_and_skips() {
        let body = r#"{"articles": [
            {"title": null, "url": "https://a.example.com", "description": null},
            {"title": "No url"},
            {"title": "B", "url": "https://b.example.com", "description": "b"},
            {"title": "C", "url": "https://c.example.com"}
        ]}"#;
        let refs = parse_search_response(body, 3).unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].title, "");
        assert_eq!(refs[1].url, "https://b.example.com");
        assert_eq!(refs[1].description.as_deref(), Some("b"));
    }

    #[test]
    fn test_parse_search_response_bound_applies_before_skipping() {
        let body = r#"{"articles": [
            {"title": "A", "url": "https://a.example.com"},
            {"title": "No url"},
            {"title": "C", "url": "https://c.example.com"}
        ]}"#;
        let refs = parse_search_response(body, 2).unwrap();
        let urls: Vec<_> = refs.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.example.com"]);
    }

    #[test]
    fn test_search_failure_message_hides_key() {
        let url = search_url(&config(5), "climate", "SECRETKEY123").unwrap();
        let errors = [
            Error::Status {
                status: 502,
                url: url.to_string(),
            },
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("error sending request for url ({url})"),
            )),
        ];
        for e in &errors {
            assert!(e.to_string().contains("SECRETKEY123"));
            let message = search_failure_message(e, "SECRETKEY123");
            assert!(!message.contains("SECRETKEY123"), "leaked in {message}");
            assert!(message.contains("apiKey=[REDACTED]"));
        }
    }

    #[test]
    fn test_parse_search_response_missing_articles() {
        assert!(parse_search_response(r#"{"status":"ok"}"#, 5).unwrap().is_empty());
        assert!(parse_search_response("not json", 5).is_err());
    }

    #[tokio::test]
    async fn test_non_success_status_is_empty() {
        let source = FakePageSource::new().with_prefix(
            ENDPOINT,
            429,
            r#"{"status":"error","code":"rateLimited"}"#,
        );
        let articles = fetch_articles(&source, &config(5), "climate change", "key").await;
        assert!(articles.is_empty());
        assert_eq!(source.request_count(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_search_is_empty() {
        let source = FakePageSource::new();
        assert!(fetch_articles(&source, &config(5), "anything", "key").await.is_empty());
    }

    #[tokio::test]
    async fn test_bounded_by_max_articles_in_order() {
        let mut source = FakePageSource::new().with_prefix(ENDPOINT, 200, &search_body(8));
        for i in 1..=8 {
            source = source.with_page(
                &format!("https://site{i}.example.com/story"),
                404,
                &format!("<p>Body {i}</p>"),
            );
        }
        let articles = fetch_articles(&source, &config(3), "topic", "key").await;
        let titles: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Story 1", "Story 2", "Story 3"]);
        assert_eq!(articles[2].content.as_deref(), Some("Body 3"));
    }

    #[tokio::test]
    async fn test_failed_article_falls_back_to_description() {
        let source = FakePageSource::new()
            .with_prefix(ENDPOINT, 200, &search_body(3))
            .with_page("https://site1.example.com/story", 404, "<p>One</p>")
            .with_page("https://site3.example.com/story", 404, "<p>Three</p>");
        let articles = fetch_articles(&source, &config(5), "topic", "key").await;
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].content.as_deref(), Some("One"));
        assert_eq!(articles[1].content.as_deref(), Some("Description 2"));
        assert_eq!(articles[2].content.as_deref(), Some("Three"));
    }
}
