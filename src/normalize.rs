//! Topic normalization for the search query.

use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s]").expect("static regex"));

/// Strip everything but ASCII letters, digits and whitespace, trim, lowercase.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_query("Climate Change!!"), "climate change");
/// ```
pub fn normalize_query(raw: &str) -> String {
    DISALLOWED.replace_all(raw, "").trim().to_lowercase()
}
