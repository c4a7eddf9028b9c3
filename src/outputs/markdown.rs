//! Markdown rendering of an analysis report.

use crate::models::{AnalysisReport, Sentiment};
use std::fmt::Write;

/// Notice shown when the search produced nothing to analyze.
pub const NO_RESULTS_NOTICE: &str = "No articles found or NewsAPI limit reached.";

fn sentiment_line(s: &Sentiment) -> String {
    format!(
        "neg {:.3} | neu {:.3} | pos {:.3} | compound {:.4}",
        s.negative, s.neutral, s.positive, s.compound
    )
}

/// Escape characters that would end a Markdown link label early.
fn escape_link_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '[' | ']' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Render `report` as a Markdown document.
pub fn report_to_markdown(report: &AnalysisReport) -> String {
    let mut md = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(md, "# News Bias Analysis: {}\n", report.query);
    let _ = writeln!(
        md,
        "_Generated {}_\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    if report.is_empty() {
        let _ = writeln!(md, "{NO_RESULTS_NOTICE}");
        return md;
    }

    let _ = writeln!(md, "## Articles & Bias Analysis\n");
    for article in &report.articles {
        let title = if article.title.is_empty() {
            article.url.as_str()
        } else {
            article.title.as_str()
        };
        let _ = writeln!(md, "### [{}]({})\n", escape_link_text(title), article.url);
        let _ = writeln!(md, "**Bias Score:** {}  ", article.bias_score);
        let _ = writeln!(md, "**Sentiment:** {}\n", sentiment_line(&article.sentiment));
        if !article.content_preview.is_empty() {
            let _ = writeln!(md, "{}\n", article.content_preview);
        }
        let _ = writeln!(md, "---\n");
    }

    if let (Some(bias), Some(compound)) = (report.average_bias(), report.average_compound()) {
        let _ = writeln!(
            md,
            "_Average bias score {:.2} across {} articles; average compound sentiment {:.4}._\n",
            bias,
            report.articles.len(),
            compound
        );
    }

    let _ = writeln!(md, "## Neutral Summary\n");
    let _ = writeln!(md, "{}", report.summary);
    md
}
