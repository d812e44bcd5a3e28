//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Probe errors ──────────────────────────────────────────────────────────────

/// Per-probe failures decided before any process is spawned.
///
/// These are recorded on the probe's outcome and never abort the run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProbeError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("No custom script provided")]
    NoCustomScript,
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors raised while turning raw inputs into a `RunConfig`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Input required: target")]
    MissingTarget,
}

// ── Run errors ────────────────────────────────────────────────────────────────

/// Failures outside the probe loop. Any of these fails the whole run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("cannot create output directory {}: {message}", path.display())]
    OutputDir { path: PathBuf, message: String },

    #[error("no archiver could create {}: {attempts}", dest.display())]
    ArchiveExhausted { dest: PathBuf, attempts: String },
}
