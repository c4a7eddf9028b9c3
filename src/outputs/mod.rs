//! Report output formats.
//!
//! - [`markdown`]: Renders a report for the terminal or a `.md` file
//! - [`json`]: Writes a report to a dated JSON file for later consumption

pub mod json;
pub mod markdown;
