//! Infrastructure implementation of the `ExecutableResolver` port.
//!
//! Asks the platform's own lookup tool (`where` on Windows, `which`
//! elsewhere) through a `CommandRunner`.

use std::time::Duration;

use netdiag_common::{AttemptResult, Platform};

use crate::application::ports::{CommandRunner, ExecutableResolver};

/// Upper bound for a single `which`/`where` call.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Production resolver backed by `which`/`where`.
pub struct PathLookup<R> {
    runner: R,
    platform: Platform,
}

impl<R: CommandRunner> PathLookup<R> {
    #[must_use]
    pub fn new(runner: R, platform: Platform) -> Self {
        Self { runner, platform }
    }

    fn lookup_tool(&self) -> &'static str {
        if self.platform.is_windows() { "where" } else { "which" }
    }
}

impl<R: CommandRunner> ExecutableResolver for PathLookup<R> {
    async fn is_available(&self, name: &str) -> bool {
        match self
            .runner
            .run_with_timeout(self.lookup_tool(), &[name], LOOKUP_TIMEOUT)
            .await
        {
            AttemptResult::Success { stdout, .. } => !stdout.trim().is_empty(),
            _ => false,
        }
    }
}
