//! Neutral digest over the scored articles.
//!
//! With a generation key configured this returns a fixed placeholder digest;
//! no external generator is called. Without one, the digest is the joined
//! article previews cut to [`SUMMARY_CHARS`] characters.

use crate::models::BiasRecord;
use itertools::Itertools;
use tracing::{debug, instrument};

pub const NO_ARTICLES_MESSAGE: &str = "No articles available to summarize.";

pub const PLACEHOLDER_SUMMARY: &str = "Neutral Summary (mock): Based on multiple sources, \
                                       this report balances perspectives to avoid bias.";

/// Maximum digest length, in characters.
pub const SUMMARY_CHARS: usize = 1000;

/// Build the digest for one query's records.
#[instrument(level = "info", skip_all, fields(count = records.len(), generation_key = has_generation_key))]
pub fn generate_summary(records: &[BiasRecord], has_generation_key: bool) -> String {
    if records.is_empty() {
        return NO_ARTICLES_MESSAGE.to_string();
    }

    let combined = records.iter().map(|r| r.content_preview.as_str()).join(" ");
    if has_generation_key {
        debug!("Generation key configured; returning placeholder digest");
        return PLACEHOLDER_SUMMARY.to_string();
    }
    combined.chars().take(SUMMARY_CHARS).collect()
}
