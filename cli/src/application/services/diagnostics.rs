//! Application service — the diagnostic run use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Probes run strictly one after another; the output directory is written
//! from this single flow only, so no file is ever written concurrently.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use netdiag_common::{Platform, Report};

use crate::application::ports::{
    ArtifactStore, CommandRunner, ExecutableResolver, ProgressReporter,
};
use crate::application::services::archive::{ArchiveExporter, archive_file_name};
use crate::application::services::probe_registry::{ProbeRegistry, ProbeRequest};
use crate::application::services::trace::trace_note;
use crate::domain::config::{ArtifactMode, RunConfig};
use crate::domain::error::RunError;
use crate::domain::probe::log_file_name;
use crate::domain::report::{ReportBuilder, log_contents};
use crate::domain::sanitize::Sanitizer;

pub const REPORT_FILE: &str = "report.json";
pub const SUMMARY_FILE: &str = "summary.txt";

/// Final message reported to the host on success.
pub const COMPLETED_MESSAGE: &str = "Network troubleshooting completed";

/// What a completed run produced.
#[derive(Debug)]
pub struct RunOutput {
    /// In-memory report, never redacted.
    pub report: Report,
    pub summary: String,
    pub output_dir: PathBuf,
    /// Copy of the output directory in the staging location.
    pub copied_to: Option<PathBuf>,
    /// Archive path; ends in `.tar.gz` when a tar strategy was used.
    pub archive: Option<PathBuf>,
}

/// Writes run artifacts, redacting them when sanitization is on.
pub struct OutputWriter<'a, S> {
    store: &'a S,
    dir: &'a Path,
    sanitizer: Sanitizer,
}

impl<'a, S: ArtifactStore> OutputWriter<'a, S> {
    #[must_use]
    pub fn new(store: &'a S, dir: &'a Path, sanitizer: Sanitizer) -> Self {
        Self {
            store,
            dir,
            sanitizer,
        }
    }

    /// Write `text` to `<dir>/<file_name>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot write the file.
    pub fn write_text(&self, file_name: &str, text: &str) -> Result<PathBuf> {
        let path = self.dir.join(file_name);
        self.store.write(&path, &self.sanitizer.apply(text))?;
        Ok(path)
    }

    /// Serialize `value` as pretty JSON, redacting string values.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_json(&self, file_name: &str, value: &impl serde::Serialize) -> Result<PathBuf> {
        let mut doc = serde_json::to_value(value).context("serializing report")?;
        self.sanitizer.apply_json(&mut doc);
        let text = serde_json::to_string_pretty(&doc).context("serializing report")?;
        let path = self.dir.join(file_name);
        self.store.write(&path, &text)?;
        Ok(path)
    }
}

/// Run every configured probe, persist the report and export artifacts.
///
/// Per-probe failures are recorded and never stop the loop.
///
/// # Errors
///
/// Returns an error only for failures outside the probe loop: the output
/// directory cannot be created, the report or summary cannot be written,
/// the staging copy fails, or no archive strategy succeeded.
pub async fn run_diagnostics(
    config: &RunConfig,
    platform: Platform,
    runner: &impl CommandRunner,
    resolver: &impl ExecutableResolver,
    store: &impl ArtifactStore,
    reporter: &impl ProgressReporter,
) -> Result<RunOutput> {
    store
        .create_dir_all(&config.output_dir)
        .map_err(|err| RunError::OutputDir {
            path: config.output_dir.clone(),
            message: format!("{err:#}"),
        })?;

    let writer = OutputWriter::new(
        store,
        &config.output_dir,
        Sanitizer::new(config.sanitize_outputs),
    );
    let registry = ProbeRegistry::new(runner, resolver, store);
    let request = ProbeRequest {
        target: &config.target,
        platform,
        timeout: config.timeout,
        retries: config.retries,
        custom_script: config.custom_script.as_deref(),
        script_dir: &config.output_dir,
    };
    let mut builder = ReportBuilder::new(&config.target, Platform::os_name(), Utc::now());
    tracing::debug!(
        host = %config.target,
        entries = config.expected_entries(),
        "starting diagnostic run"
    );

    for tool in &config.tools {
        reporter.step(&format!("running {tool}..."));
        let outcome = registry.execute(tool, &request).await;

        if let Err(err) = writer.write_text(&log_file_name(tool), &log_contents(&outcome.result)) {
            tracing::warn!(%tool, error = %format!("{err:#}"), "cannot write probe log");
            reporter.warn(&format!("{tool}: log not written"));
        }

        match outcome.error() {
            Some(error) => reporter.warn(&format!("{tool}: {error}")),
            None => reporter.success(&format!("{tool}: OK")),
        }
        tracing::info!(
            %tool,
            attempts = outcome.attempts.len(),
            ok = outcome.error().is_none(),
            "probe finished"
        );
        builder.append(outcome);
    }

    if config.capture_network_trace {
        builder.append(trace_note(resolver, platform).await);
    }

    let (report, summary) = builder.finalize();
    writer.write_json(REPORT_FILE, &report)?;
    writer.write_text(SUMMARY_FILE, &summary)?;

    let (copied_to, archive) = match config.artifacts {
        ArtifactMode::None => (None, None),
        ArtifactMode::Copy => {
            let dest = stage_copy(config, store)?;
            reporter.success(&format!("outputs saved to {}", dest.display()));
            (Some(dest), None)
        }
        ArtifactMode::Archive => {
            let dest = stage_copy(config, store)?;
            let archive_path = config
                .staging_dir
                .join(archive_file_name(&config.artifact_name, Utc::now()));
            let receipt = ArchiveExporter::new(runner, store, platform)
                .export(&dest, &archive_path)
                .await?;
            reporter.success(&format!("outputs archived to {}", receipt.path.display()));
            (Some(dest), Some(receipt.path))
        }
    };

    Ok(RunOutput {
        report,
        summary,
        output_dir: config.output_dir.clone(),
        copied_to,
        archive,
    })
}

/// Copy the output directory to `<staging>/<artifact name>`.
fn stage_copy(config: &RunConfig, store: &impl ArtifactStore) -> Result<PathBuf> {
    let dest = config.staging_dir.join(&config.artifact_name);
    if dest == config.output_dir {
        tracing::debug!(path = %dest.display(), "output already in staging location");
        return Ok(dest);
    }
    store.create_dir_all(&dest)?;
    store
        .copy_dir(&config.output_dir, &dest)
        .with_context(|| format!("copying outputs to {}", dest.display()))?;
    Ok(dest)
}
