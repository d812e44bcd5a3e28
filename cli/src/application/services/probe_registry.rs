//! Application service — resolve a probe name to a command and run it.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Unknown names and a missing script body are answered without touching
//! the runner; everything else goes through [`RetryPolicy`].

use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use netdiag_common::{Attempt, Platform, ProbeOutcome, ProbeResult};

use crate::application::ports::{ArtifactStore, CommandRunner, ExecutableResolver};
use crate::application::services::retry::RetryPolicy;
use crate::domain::error::ProbeError;
use crate::domain::probe::{
    CommandRule, Invocation, ProbeId, command_rule, script_file_name, script_invocation,
};

/// Per-run inputs shared by every probe.
#[derive(Debug, Clone, Copy)]
pub struct ProbeRequest<'a> {
    pub target: &'a str,
    pub platform: Platform,
    pub timeout: Duration,
    pub retries: u32,
    /// Body for the `script` probe.
    pub custom_script: Option<&'a str>,
    /// Directory the script body is written to.
    pub script_dir: &'a Path,
}

/// Dispatches probe names onto the injected runner, resolver and store.
pub struct ProbeRegistry<'a, R, P, S> {
    runner: &'a R,
    resolver: &'a P,
    store: &'a S,
}

impl<'a, R, P, S> ProbeRegistry<'a, R, P, S>
where
    R: CommandRunner,
    P: ExecutableResolver,
    S: ArtifactStore,
{
    #[must_use]
    pub fn new(runner: &'a R, resolver: &'a P, store: &'a S) -> Self {
        Self {
            runner,
            resolver,
            store,
        }
    }

    /// Run the probe named `name` and record its outcome.
    ///
    /// Never fails: every problem becomes part of the returned outcome.
    pub async fn execute(&self, name: &str, request: &ProbeRequest<'_>) -> ProbeOutcome {
        let started_at = Utc::now();

        let probe = match ProbeId::parse(name) {
            Ok(probe) => probe,
            Err(err) => {
                return ProbeOutcome::immediate(
                    name,
                    started_at,
                    ProbeResult::UnknownTool {
                        error: err.to_string(),
                    },
                );
            }
        };

        let invocation = match self.plan(probe, request).await {
            Ok(invocation) => invocation,
            Err(result) => return ProbeOutcome::immediate(name, started_at, result),
        };
        tracing::debug!(probe = %probe, command = %invocation, "resolved probe command");

        let program = invocation.program.as_str();
        let args = invocation.arg_refs();
        let args = args.as_slice();
        let timeout = request.timeout;
        let retried = RetryPolicy::new(request.retries)
            .run(probe.name(), move || self.attempt(program, args, timeout))
            .await;

        tracing::debug!(probe = %probe, attempts = retried.attempts(), "probe attempts done");
        let mut attempts = retried.failures;
        let last = match retried.result {
            Ok(attempt) | Err(attempt) => attempt,
        };
        let result = ProbeResult::from(last.result.clone());
        attempts.push(last);

        ProbeOutcome {
            tool: name.to_string(),
            started_at,
            finished_at: Utc::now().max(started_at),
            attempts,
            result,
        }
    }

    /// Concrete command for `probe` on this host.
    ///
    /// # Errors
    ///
    /// Returns the outcome to record when no command can be run: a missing
    /// script body, or a script file that cannot be written.
    pub async fn plan(
        &self,
        probe: ProbeId,
        request: &ProbeRequest<'_>,
    ) -> Result<Invocation, ProbeResult> {
        let rule = command_rule(
            probe,
            request.platform,
            request.target,
            request.timeout.as_secs(),
        );
        if rule == CommandRule::Script {
            return self.prepare_script(request);
        }

        let found = {
            let names = rule.candidate_names();
            if names.is_empty() {
                None
            } else {
                self.resolver.resolve(&names).await
            }
        };
        rule.select(found.as_deref())
            .ok_or_else(|| ProbeResult::ConfigError {
                error: format!("no command for probe {probe}"),
            })
    }

    fn prepare_script(&self, request: &ProbeRequest<'_>) -> Result<Invocation, ProbeResult> {
        let Some(body) = request.custom_script.filter(|s| !s.is_empty()) else {
            return Err(ProbeResult::ConfigError {
                error: ProbeError::NoCustomScript.to_string(),
            });
        };

        let path = request.script_dir.join(script_file_name(request.platform));
        let written = self.store.write(&path, body).and_then(|()| {
            if request.platform.is_windows() {
                Ok(())
            } else {
                self.store.set_executable(&path)
            }
        });
        if let Err(err) = written {
            return Err(ProbeResult::ExecutionError {
                error: format!("{err:#}"),
                exit_code: None,
                stdout: String::new(),
                stderr: String::new(),
            });
        }
        Ok(script_invocation(request.platform, &path))
    }

    async fn attempt(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Attempt, Attempt> {
        let started_at = Utc::now();
        let result = self.runner.run_with_timeout(program, args, timeout).await;
        let attempt = Attempt {
            started_at,
            finished_at: Utc::now().max(started_at),
            result,
        };
        if attempt.result.is_success() {
            Ok(attempt)
        } else {
            Err(attempt)
        }
    }
}
