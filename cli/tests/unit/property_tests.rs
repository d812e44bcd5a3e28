//! Property-based tests for redaction and retry bounds.

use std::cell::Cell;

use netdiag_cli::application::services::retry::RetryPolicy;
use netdiag_cli::domain::sanitize::{REDACTION_MARKER, Sanitizer, redact};
use proptest::prelude::*;

fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .map(|rt| rt.block_on(fut))
        .unwrap_or_else(|e| panic!("runtime: {e}"))
}

fn longest_token_run(text: &str) -> usize {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .map(str::len)
        .max()
        .unwrap_or(0)
}

proptest! {
    /// No run of 20+ token characters survives redaction.
    #[test]
    fn prop_redacted_text_has_no_long_tokens(text in "[A-Za-z0-9_ .:=\\n-]{0,200}") {
        let out = redact(&text).replace(REDACTION_MARKER, " ");
        prop_assert!(longest_token_run(&out) < 20, "{out:?}");
    }

    /// Authorization header values never survive redaction.
    #[test]
    fn prop_authorization_value_is_removed(
        prefix in "[a-z ]{0,10}",
        value in "[A-Za-z0-9+/=]{1,19}",
    ) {
        let text = format!("{prefix} authorization: Bearer {value}\nnext line");
        let out = redact(&text);
        prop_assert!(!out.contains(&format!("Bearer {value}")), "{out:?}");
        prop_assert!(out.ends_with("\nnext line"));
    }

    /// Disabled sanitizer returns the input unchanged.
    #[test]
    fn prop_disabled_sanitizer_is_identity(text in "\\PC{0,200}") {
        prop_assert_eq!(Sanitizer::new(false).apply(&text), text);
    }

    /// Redaction is idempotent.
    #[test]
    fn prop_redact_is_idempotent(text in "[A-Za-z0-9_ :\\n-]{0,120}") {
        let once = redact(&text);
        prop_assert_eq!(redact(&once), once);
    }

    /// 1 <= attempts <= retries + 1, whatever the failure pattern.
    #[test]
    fn prop_attempts_within_retry_budget(
        retries in 0u32..6,
        succeed_on in proptest::option::of(1u32..10),
    ) {
        let calls = Cell::new(0u32);
        let retried = block_on(RetryPolicy::new(retries).run("probe", || {
            let n = calls.get() + 1;
            calls.set(n);
            async move {
                if succeed_on == Some(n) { Ok(n) } else { Err(n) }
            }
        }));
        let attempts = u32::try_from(retried.attempts()).unwrap_or(u32::MAX);
        prop_assert!(attempts >= 1);
        prop_assert!(attempts <= retries + 1);
        prop_assert_eq!(attempts, calls.get());
        match succeed_on {
            Some(n) if n <= retries + 1 => prop_assert_eq!(retried.result, Ok(n)),
            _ => prop_assert!(retried.result.is_err()),
        }
    }
}
