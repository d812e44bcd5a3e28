//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` is the production implementation that uses tokio
//! for async process execution with guaranteed timeout and kill on all platforms.

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use netdiag_common::AttemptResult;
use tokio::io::AsyncReadExt;

use crate::application::ports::CommandRunner;

/// Timeout used when a caller passes a zero duration.
pub const DEFAULT_CMD_TIMEOUT: Duration = Duration::from_secs(30);

/// Production `CommandRunner` — uses tokio for async process execution
/// with guaranteed timeout and kill on all platforms.
///
/// On Windows, `tokio::time::timeout` around `.output().await` does NOT kill
/// the child process when the timeout fires — the future is dropped but the
/// OS process keeps running. This implementation uses `tokio::select!` with
/// explicit `child.kill()` to guarantee the process is terminated.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    async fn execute(
        mut command: tokio::process::Command,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> AttemptResult {
        let timeout = if timeout.is_zero() {
            DEFAULT_CMD_TIMEOUT
        } else {
            timeout
        };
        let spawned = command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(err) => {
                return AttemptResult::SpawnError {
                    message: format!("failed to spawn {program}: {err}"),
                    os_code: err.raw_os_error(),
                };
            }
        };

        let mut stdout_handle = child.stdout.take();
        let mut stderr_handle = child.stderr.take();

        tokio::select! {
            (status, stdout, stderr) = async {
                tokio::join!(
                    child.wait(),
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stdout_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stderr_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                )
            } => {
                let stdout = String::from_utf8_lossy(&stdout).into_owned();
                let stderr = String::from_utf8_lossy(&stderr).into_owned();
                match status {
                    Ok(status) => classify_exit(status, program, args, stdout, stderr),
                    Err(err) => AttemptResult::ExecutionError {
                        message: format!("waiting for {program}: {err}"),
                        exit_code: None,
                        stdout,
                        stderr,
                    },
                }
            }
            () = tokio::time::sleep(timeout) => {
                let _ = child.kill().await;
                AttemptResult::Timeout {
                    message: format!("Timed out after {}s", timeout.as_secs()),
                }
            }
        }
    }
}

/// Map a finished process to success or an execution error.
fn classify_exit(
    status: ExitStatus,
    program: &str,
    args: &[&str],
    stdout: String,
    stderr: String,
) -> AttemptResult {
    if status.success() {
        return AttemptResult::Success { stdout, stderr };
    }
    let mut message = format!("Command failed: {program}");
    for arg in args {
        message.push(' ');
        message.push_str(arg);
    }
    match status.code() {
        Some(code) => message.push_str(&format!(" (exit code {code})")),
        None => message.push_str(" (terminated by signal)"),
    }
    if !stderr.trim().is_empty() {
        message.push('\n');
        message.push_str(stderr.trim_end());
    }
    AttemptResult::ExecutionError {
        message,
        exit_code: status.code(),
        stdout,
        stderr,
    }
}

impl CommandRunner for TokioCommandRunner {
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> AttemptResult {
        Self::execute(tokio::process::Command::new(program), program, args, timeout).await
    }

    async fn run_in_dir(
        &self,
        program: &str,
        args: &[&str],
        dir: &Path,
        timeout: Duration,
    ) -> AttemptResult {
        let mut command = tokio::process::Command::new(program);
        command.current_dir(dir);
        Self::execute(command, program, args, timeout).await
    }
}
