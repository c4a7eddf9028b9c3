//! Error types shared across the pipeline.
//!
//! Only validation failures and genuinely fatal conditions (unwritable output,
//! unreadable config) reach the caller as [`Error`]. Search and extraction
//! failures are absorbed inside the fetcher and extractor and degrade to
//! emptier results instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Please enter a topic.")]
    EmptyTopic,

    #[error("Please set your NewsAPI key (--news-api-key, NEWSAPI_KEY or the config file).")]
    MissingSearchKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl Error {
    /// Whether this error is a user-input problem caught before any I/O.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::EmptyTopic | Error::MissingSearchKey)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
