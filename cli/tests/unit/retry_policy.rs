//! Unit tests for `RetryPolicy`.

use std::cell::Cell;

use netdiag_cli::application::services::retry::RetryPolicy;

#[tokio::test]
async fn success_on_first_try_records_no_failures() {
    let calls = Cell::new(0);
    let retried = RetryPolicy::new(3)
        .run("ping", || {
            calls.set(calls.get() + 1);
            async { Ok::<_, String>("pong") }
        })
        .await;
    assert_eq!(calls.get(), 1);
    assert_eq!(retried.attempts(), 1);
    assert_eq!(retried.result, Ok("pong"));
}

#[tokio::test]
async fn exhausted_budget_keeps_every_failure() {
    let calls = Cell::new(0);
    let retried = RetryPolicy::new(2)
        .run("dns", || {
            let n = calls.get() + 1;
            calls.set(n);
            async move { Err::<(), _>(format!("failure {n}")) }
        })
        .await;
    assert_eq!(calls.get(), 3);
    assert_eq!(retried.failures, ["failure 1", "failure 2"]);
    assert_eq!(retried.result, Err("failure 3".to_string()));
    assert_eq!(retried.attempts(), 3);
}

#[tokio::test]
async fn success_after_failures_stops_early() {
    let calls = Cell::new(0);
    let retried = RetryPolicy::new(10)
        .run("https", || {
            let n = calls.get() + 1;
            calls.set(n);
            async move { if n < 3 { Err(n) } else { Ok(n) } }
        })
        .await;
    assert_eq!(calls.get(), 3);
    assert_eq!(retried.failures, [1, 2]);
    assert_eq!(retried.result, Ok(3));
}

#[test]
fn max_attempts_saturates() {
    assert_eq!(RetryPolicy::new(0).max_attempts(), 1);
    assert_eq!(RetryPolicy::new(u32::MAX).max_attempts(), u32::MAX);
}
