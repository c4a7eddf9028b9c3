//! HTTP page retrieval.
//!
//! Every network read in the pipeline goes through the [`PageSource`] trait so
//! that the fetcher and extractor can be exercised against canned pages.
//! A non-success status is *not* an error at this layer: the page is returned
//! with its status and each caller decides what the status means.

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::utils::loggable_url;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// A downloaded page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub status: u16,
    pub body: String,
}

impl Page {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of raw pages.
pub trait PageSource {
    /// Issue a single GET for `url`. Transport failures are errors; HTTP
    /// status codes are reported in the returned [`Page`].
    async fn fetch(&self, url: &str) -> Result<Page>;
}

/// [`PageSource`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: reqwest::Client,
}

impl HttpPageSource {
    /// Build the client from the configured user agent and optional timeout.
    pub fn new(config: &AnalyzerConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl PageSource for HttpPageSource {
    /// Query strings are kept out of logs and errors: the search request
    /// carries its credential there.
    #[instrument(level = "debug", skip_all, fields(url = %loggable_url(url)))]
    async fn fetch(&self, url: &str) -> Result<Page> {
        let t0 = Instant::now();
        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                let e = e.without_url();
                warn!(elapsed_ms = t0.elapsed().as_millis() as u64, error = %e, "GET failed");
                return Err(e.into());
            }
        };
        let status = response.status().as_u16();
        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        debug!(
            status,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "GET complete"
        );
        Ok(Page { status, body })
    }
}
