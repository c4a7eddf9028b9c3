//! JSON export of an analysis report.
//!
//! Reports are grouped by the UTC date they were generated on:
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── climate-change.json
//!     └── elections.json
//! ```
//! Running the same query twice on one day overwrites the earlier report.

use crate::error::Result;
use crate::models::AnalysisReport;
use crate::utils::slugify;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Path the report will be written to under `json_output_dir`.
pub fn report_path(report: &AnalysisReport, json_output_dir: &str) -> PathBuf {
    PathBuf::from(json_output_dir)
        .join(report.generated_at.date_naive().to_string())
        .join(format!("{}.json", slugify(&report.query)))
}

/// Write `report` as pretty-printed JSON, creating the date directory.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_report(report: &AnalysisReport, json_output_dir: &str) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(report)?;
    let path = report_path(report, json_output_dir);

    if let Some(dir) = path.parent() {
        info!(dir = %dir.display(), "Ensuring JSON directory exists");
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON report");
    Ok(path)
}
