//! # News Bias Analyzer
//!
//! Fetches news articles on a topic, scores each for rhetorical bias and
//! sentiment, and produces an aggregate neutral digest.
//!
//! ## Usage
//!
//! ```sh
//! NEWSAPI_KEY=... news_bias_analyzer "climate change"
//! ```
//!
//! ## Architecture
//!
//! The application runs a strictly sequential pipeline:
//! 1. **Normalize**: Reduce the topic to a clean lowercase search query
//! 2. **Fetch**: Search NewsAPI and extract each hit's body, falling back
//!    from Readability to paragraph scraping to the API description
//! 3. **Score**: VADER sentiment plus an opinion-word bias count per article
//! 4. **Summarize**: Join the previews into a bounded neutral digest
//!
//! The Markdown report goes to stdout; logs go to stderr.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod extract;
mod fetcher;
mod models;
mod normalize;
mod outputs;
mod page_source;
mod pipeline;
mod scorer;
mod summary;
mod utils;

use cli::Cli;
use config::AnalyzerConfig;
use outputs::{json, markdown};
use page_source::HttpPageSource;
use pipeline::Pipeline;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_bias_analyzer starting up");

    let args = Cli::parse();
    debug!(topic = %args.topic, ?args.config, ?args.max_articles, "Parsed CLI arguments");

    // ---- Configuration ----
    let file_config = match &args.config {
        Some(path) => AnalyzerConfig::load(path).await?,
        None => AnalyzerConfig::default(),
    };
    let config = file_config.with_cli_overrides(&args);

    // Early check: ensure JSON output dir is writable before spending requests
    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "JSON output directory is not writable");
            return Err(e.into());
        }
    }

    // ---- Run ----
    let source = HttpPageSource::new(&config)?;
    let pipeline = Pipeline::new(config, source);
    info!(max_articles = pipeline.config().max_articles, "Fetching and analyzing articles");

    let report = match pipeline.run(&args.topic).await {
        Ok(r) => r,
        Err(e) if e.is_validation() => {
            warn!(error = %e, "Rejected input");
            eprintln!("{e}");
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };

    if report.is_empty() {
        warn!(query = %report.query, "No articles found or NewsAPI limit reached");
    }

    // ---- Output ----
    let md = markdown::report_to_markdown(&report);
    println!("{md}");

    if let Some(path) = &args.markdown_output {
        if let Err(e) = tokio::fs::write(path, &md).await {
            error!(%path, error = %e, "Failed writing Markdown");
        } else {
            info!(%path, "Wrote Markdown report");
        }
    }

    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = json::write_report(&report, dir).await {
            error!(error = %e, "Failed to write JSON report");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        articles = report.articles.len(),
        "Execution complete"
    );

    Ok(())
}
