//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `netdiag_common` — never
//! from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use netdiag_common::AttemptResult;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
///
/// Implementations never return errors: spawn failures, non-zero exits and
/// timeouts are all classified into the returned [`AttemptResult`].
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program, killing it if it outlives `timeout`.
    async fn run_with_timeout(&self, program: &str, args: &[&str], timeout: Duration)
    -> AttemptResult;

    /// Same as [`CommandRunner::run_with_timeout`] with `dir` as working directory.
    async fn run_in_dir(
        &self,
        program: &str,
        args: &[&str],
        dir: &Path,
        timeout: Duration,
    ) -> AttemptResult;
}

// ── Executable Lookup Port ────────────────────────────────────────────────────

/// Answers "is this program on `PATH`?" so probe selection can be faked.
#[allow(async_fn_in_trait)]
pub trait ExecutableResolver {
    /// Whether `name` resolves on this host. Lookup failures count as absent.
    async fn is_available(&self, name: &str) -> bool;

    /// First candidate that resolves, in the given order.
    async fn resolve(&self, candidates: &[&str]) -> Option<String> {
        for name in candidates {
            if self.is_available(name).await {
                return Some((*name).to_string());
            }
        }
        None
    }
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Abstracts the filesystem writes a run performs.
pub trait ArtifactStore {
    /// Create a directory and all missing parents.
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// Write `content` to `path`, replacing any existing file.
    fn write(&self, path: &Path, content: &str) -> Result<()>;
    /// Mark a file executable (no-op where the platform has no mode bits).
    fn set_executable(&self, path: &Path) -> Result<()>;
    /// Recursively copy the contents of `from` into `to`.
    fn copy_dir(&self, from: &Path, to: &Path) -> Result<()>;
    /// Write a gzip-compressed tarball of `source` to `dest`.
    fn write_tar_gz(&self, source: &Path, dest: &Path) -> Result<()>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
