//! Shared test helpers: recording port fakes and result constructors.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use netdiag_cli::application::ports::{
    ArtifactStore, CommandRunner, ExecutableResolver, ProgressReporter,
};
use netdiag_common::AttemptResult;

// ── Result constructors ──────────────────────────────────────────────────────

pub fn ok(stdout: &str) -> AttemptResult {
    AttemptResult::Success {
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

pub fn failed(code: i32, stderr: &str) -> AttemptResult {
    AttemptResult::ExecutionError {
        message: format!("Command failed (exit code {code})"),
        exit_code: Some(code),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

pub fn timed_out() -> AttemptResult {
    AttemptResult::Timeout {
        message: "Timed out after 30s".to_string(),
    }
}

// ── Command runner ───────────────────────────────────────────────────────────

/// One recorded process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
    pub dir: Option<PathBuf>,
}

/// Replays canned results per program and records every call.
///
/// Queued results are consumed first; afterwards the program's default (or
/// an empty success) is returned.
#[derive(Default)]
pub struct ScriptedRunner {
    queued: RefCell<HashMap<String, VecDeque<AttemptResult>>>,
    defaults: HashMap<String, AttemptResult>,
    calls: RefCell<Vec<Call>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Result returned for every call of `program` once its queue is empty.
    pub fn always(mut self, program: &str, result: AttemptResult) -> Self {
        self.defaults.insert(program.to_string(), result);
        self
    }

    /// Results returned for the next calls of `program`, in order.
    pub fn then(self, program: &str, results: impl IntoIterator<Item = AttemptResult>) -> Self {
        self.queued
            .borrow_mut()
            .entry(program.to_string())
            .or_default()
            .extend(results);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.program.clone()).collect()
    }

    pub fn call_count(&self, program: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.program == program).count()
    }

    fn respond(&self, program: &str, args: &[&str], dir: Option<&Path>) -> AttemptResult {
        self.calls.borrow_mut().push(Call {
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            dir: dir.map(Path::to_path_buf),
        });
        if let Some(next) = self
            .queued
            .borrow_mut()
            .get_mut(program)
            .and_then(VecDeque::pop_front)
        {
            return next;
        }
        self.defaults.get(program).cloned().unwrap_or_else(|| ok(""))
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run_with_timeout(&self, program: &str, args: &[&str], _: Duration) -> AttemptResult {
        self.respond(program, args, None)
    }

    async fn run_in_dir(
        &self,
        program: &str,
        args: &[&str],
        dir: &Path,
        _: Duration,
    ) -> AttemptResult {
        self.respond(program, args, Some(dir))
    }
}

// ── Executable resolver ──────────────────────────────────────────────────────

/// Resolver that knows a fixed set of programs.
#[derive(Default)]
pub struct FakeResolver {
    available: Vec<String>,
}

impl FakeResolver {
    pub fn with(programs: &[&str]) -> Self {
        Self {
            available: programs.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

impl ExecutableResolver for FakeResolver {
    async fn is_available(&self, name: &str) -> bool {
        self.available.iter().any(|p| p == name)
    }
}

// ── Artifact store ───────────────────────────────────────────────────────────

/// In-memory store recording writes; individual operations can be made to fail.
#[derive(Default)]
pub struct MemoryStore {
    pub files: RefCell<HashMap<PathBuf, String>>,
    pub dirs: RefCell<Vec<PathBuf>>,
    pub executables: RefCell<Vec<PathBuf>>,
    pub tarballs: RefCell<Vec<(PathBuf, PathBuf)>>,
    pub fail_writes: bool,
    pub fail_tar_gz: bool,
}

impl MemoryStore {
    pub fn file(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }
}

impl ArtifactStore for MemoryStore {
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.dirs.borrow_mut().push(path.to_path_buf());
        Ok(())
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if self.fail_writes {
            anyhow::bail!("disk full");
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn set_executable(&self, path: &Path) -> Result<()> {
        self.executables.borrow_mut().push(path.to_path_buf());
        Ok(())
    }

    fn copy_dir(&self, _: &Path, _: &Path) -> Result<()> {
        Ok(())
    }

    fn write_tar_gz(&self, source: &Path, dest: &Path) -> Result<()> {
        if self.fail_tar_gz {
            anyhow::bail!("tar writer unavailable");
        }
        self.tarballs
            .borrow_mut()
            .push((source.to_path_buf(), dest.to_path_buf()));
        Ok(())
    }
}

// ── Progress reporter ────────────────────────────────────────────────────────

/// Records every progress event as `"<kind>: <message>"`.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: RefCell<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.events.borrow_mut().push(format!("step: {message}"));
    }

    fn success(&self, message: &str) {
        self.events.borrow_mut().push(format!("success: {message}"));
    }

    fn warn(&self, message: &str) {
        self.events.borrow_mut().push(format!("warn: {message}"));
    }
}
