//! Report assembly and the human-readable summary.
//!
//! Pure functions only — persistence is done by the diagnostics service.

use chrono::{DateTime, SecondsFormat, Utc};
use netdiag_common::{ProbeOutcome, ProbeResult, Report};

/// Accumulates probe outcomes in invocation order.
#[derive(Debug)]
pub struct ReportBuilder {
    run_at: DateTime<Utc>,
    target: String,
    platform: String,
    results: Vec<ProbeOutcome>,
}

impl ReportBuilder {
    #[must_use]
    pub fn new(target: &str, platform: &str, run_at: DateTime<Utc>) -> Self {
        Self {
            run_at,
            target: target.to_string(),
            platform: platform.to_string(),
            results: Vec::new(),
        }
    }

    pub fn append(&mut self, outcome: ProbeOutcome) {
        self.results.push(outcome);
    }

    /// Close the report and render its summary.
    #[must_use]
    pub fn finalize(self) -> (Report, String) {
        let report = Report {
            run_at: self.run_at,
            target: self.target,
            platform: self.platform,
            results: self.results,
        };
        let summary = render_summary(&report);
        (report, summary)
    }
}

/// Timestamp format used in the summary and archive names.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Fixed-format summary: header, then one line per outcome.
#[must_use]
pub fn render_summary(report: &Report) -> String {
    let mut lines = vec![
        format!("Network Troubleshoot summary for target: {}", report.target),
        format!("Run at: {}", format_timestamp(report.run_at)),
        format!("Platform: {}", report.platform),
        String::new(),
        "Results:".to_string(),
    ];
    for outcome in &report.results {
        match outcome.error() {
            Some(error) => lines.push(format!("- {}: ERROR: {error}", outcome.tool)),
            None => lines.push(format!("- {}: OK", outcome.tool)),
        }
    }
    lines.join("\n")
}

/// Text written to a probe's log file: stdout, else stderr, else the
/// serialized result.
#[must_use]
pub fn log_contents(result: &ProbeResult) -> String {
    let (stdout, stderr) = match result {
        ProbeResult::Succeeded { stdout, stderr }
        | ProbeResult::ExecutionError { stdout, stderr, .. } => (stdout.as_str(), stderr.as_str()),
        ProbeResult::TimedOut { .. }
        | ProbeResult::UnknownTool { .. }
        | ProbeResult::ConfigError { .. }
        | ProbeResult::Info { .. } => ("", ""),
    };
    if !stdout.is_empty() {
        return stdout.to_string();
    }
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    serde_json::to_string(result).unwrap_or_else(|_| result.error().unwrap_or_default().to_string())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
