//! Utility functions for string handling and file system checks.
//!
//! - String truncation and secret redaction for logging
//! - Slugification for report filenames
//! - File system validation for output directories

use crate::error::Result;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument, warn};
use url::Url;

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (backing off to a character
/// boundary) with an ellipsis and the number of dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Replace every occurrence of `secret` in `text` with `[REDACTED]`.
///
/// Both the raw and the URL-encoded form of `secret` are replaced, so error
/// messages that embed a request URL are covered. An empty `secret` leaves
/// `text` unchanged.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(redact_secret("GET /?apiKey=abc", "abc"), "GET /?apiKey=[REDACTED]");
/// ```
pub fn redact_secret(text: &str, secret: &str) -> String {
    if secret.is_empty() {
        return text.to_string();
    }
    let encoded: String = url::form_urlencoded::byte_serialize(secret.as_bytes()).collect();
    text.replace(secret, "[REDACTED]").replace(&encoded, "[REDACTED]")
}

/// A URL with its query string and fragment removed, for span fields.
///
/// Unparseable input is returned unchanged.
pub fn loggable_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_query(None);
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => url.to_string(),
    }
}

/// Convert a query to a filename-friendly slug.
///
/// Lowercases, drops anything that is not alphanumeric, a space or a hyphen,
/// collapses whitespace runs into single hyphens. An empty result becomes
/// `"report"`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify("Climate   Change"), "climate-change");
/// ```
pub fn slugify(text: &str) -> String {
    let cleaned = text
        .to_lowercase()
        .replace(|c: char| !c.is_alphanumeric() && c != ' ' && c != '-', "");
    let slug = cleaned.split_whitespace().collect::<Vec<_>>().join("-");
    if slug.is_empty() {
        "report".to_string()
    } else {
        slug
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then creates and removes a probe file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<()> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    stdfs::File::create(&probe_path)?;
    if let Err(e) = stdfs::remove_file(&probe_path) {
        warn!(path = %probe_path, error = %e, "Failed to remove write probe");
    }
    info!("Output directory is writable");
    Ok(())
}
