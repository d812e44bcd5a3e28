//! JSON output helpers.
//!
//! Provides the report printer for `run --json` and the error-object
//! formatter used by all `--json` code paths when a command fails.

use anyhow::{Context, Result};
use netdiag_common::Report;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Pretty JSON of the in-memory (unredacted) report.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("JSON serialization failed")
}
