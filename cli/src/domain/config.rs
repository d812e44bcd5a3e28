//! Run configuration and input coercion.
//!
//! Pure functions only — no I/O, no async, no filesystem access. Raw values
//! arrive already parsed by the CLI layer (flags or environment variables).

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ARTIFACT_NAME: &str = "network-troubleshoot";
pub const OUTPUT_DIR_NAME: &str = "network-troubleshoot";

// ── Raw inputs ───────────────────────────────────────────────────────────────

/// Inputs as handed over by the host environment, before coercion.
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    pub target: Option<String>,
    /// Newline-separated probe list.
    pub tools: Option<String>,
    /// Extra probe names appended after `tools`.
    pub extra_tools: Vec<String>,
    pub capture_network_trace: bool,
    pub custom_script: Option<String>,
    pub sanitize_outputs: bool,
    pub archive_artifacts: bool,
    pub save_artifacts: bool,
    pub artifact_name: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub retries: Option<u32>,
    pub output_dir: Option<PathBuf>,
    pub staging_dir: Option<PathBuf>,
}

// ── Config schema ────────────────────────────────────────────────────────────

/// Fully resolved settings for one diagnostic run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub target: String,
    pub tools: Vec<String>,
    pub capture_network_trace: bool,
    pub custom_script: Option<String>,
    pub sanitize_outputs: bool,
    pub artifacts: ArtifactMode,
    pub artifact_name: String,
    /// Per-attempt timeout, applied to every probe.
    pub timeout: Duration,
    /// Extra attempts beyond the first.
    pub retries: u32,
    /// Where probe logs, `report.json` and `summary.txt` are written.
    pub output_dir: PathBuf,
    /// Where the output copy and archive are placed.
    pub staging_dir: PathBuf,
}

/// What happens to the output directory after the probes ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactMode {
    /// Copy to staging and compress the copy.
    Archive,
    /// Copy to staging only.
    Copy,
    None,
}

impl RunConfig {
    /// Coerce raw inputs into a run configuration.
    ///
    /// A zero timeout falls back to the default; an empty script body counts
    /// as no script.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingTarget`] if the target is absent or blank.
    pub fn from_inputs(raw: RawInputs) -> Result<Self, ConfigError> {
        let target = raw
            .target
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingTarget)?;

        let mut tools = parse_tools(raw.tools.as_deref().unwrap_or_default());
        tools.extend(
            raw.extra_tools
                .iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        );

        let artifacts = if raw.archive_artifacts {
            ArtifactMode::Archive
        } else if raw.save_artifacts {
            ArtifactMode::Copy
        } else {
            ArtifactMode::None
        };

        let timeout_secs = raw
            .timeout_seconds
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let output_dir = raw
            .output_dir
            .unwrap_or_else(|| std::env::temp_dir().join(OUTPUT_DIR_NAME));
        let staging_dir = raw.staging_dir.unwrap_or_else(|| {
            output_dir
                .parent()
                .map_or_else(|| output_dir.clone(), std::path::Path::to_path_buf)
        });

        Ok(Self {
            target,
            tools,
            capture_network_trace: raw.capture_network_trace,
            custom_script: raw.custom_script.filter(|s| !s.is_empty()),
            sanitize_outputs: raw.sanitize_outputs,
            artifacts,
            artifact_name: raw
                .artifact_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ARTIFACT_NAME.to_string()),
            timeout: Duration::from_secs(timeout_secs),
            retries: raw.retries.unwrap_or(0),
            output_dir,
            staging_dir,
        })
    }

    /// Number of report entries this configuration produces.
    #[must_use]
    pub fn expected_entries(&self) -> usize {
        self.tools.len() + usize::from(self.capture_network_trace)
    }
}

/// Split a newline-separated probe list, trimming blanks.
#[must_use]
pub fn parse_tools(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ── Unit tests ───────────────────────────────────────────────────────────────
