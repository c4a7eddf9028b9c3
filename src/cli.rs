//! Command-line interface definitions for the news bias analyzer.
//!
//! Credentials can be passed as flags, through environment variables, or
//! through the YAML config file; flags and environment win over the file.

use clap::Parser;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Analyze a topic with the key taken from NEWSAPI_KEY
/// news_bias_analyzer "climate change"
///
/// # Analyze ten articles and export the report as JSON
/// news_bias_analyzer elections --max-articles 10 --json-output-dir ./reports
///
/// # Read keys and endpoint settings from a file
/// news_bias_analyzer "AI regulation" --config ./analyzer.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// News topic to analyze (e.g. "climate change", "elections", "AI")
    pub topic: String,

    /// NewsAPI key used for the article search
    #[arg(long, env = "NEWSAPI_KEY", hide_env_values = true)]
    pub news_api_key: Option<String>,

    /// Key for the summary generation service (optional)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub generation_api_key: Option<String>,

    /// Maximum number of articles to analyze [default: 5]
    #[arg(short = 'n', long)]
    pub max_articles: Option<usize>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory to write the JSON report into
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// File to also write the Markdown report to
    #[arg(short, long)]
    pub markdown_output: Option<String>,
}
