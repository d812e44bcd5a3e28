//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod probe;
pub mod report;
pub mod sanitize;
pub mod trace;

pub use config::{ArtifactMode, RawInputs, RunConfig, parse_tools};
pub use error::{ConfigError, ProbeError, RunError};
pub use probe::{ALL_PROBES, CommandRule, Invocation, ProbeId, command_rule, log_file_name};
pub use report::{ReportBuilder, render_summary};
pub use sanitize::{REDACTION_MARKER, Sanitizer, redact};
