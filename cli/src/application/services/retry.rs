//! Bounded, sequential retry of a fallible async operation.
//!
//! Every failure is retried the same way; there is no delay between tries.

use std::future::Future;

/// Up to `max_retries + 1` tries of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryPolicy {
    max_retries: u32,
}

/// Everything a retried operation produced.
#[derive(Debug)]
pub struct Retried<T, E> {
    /// Failed tries before the final one, oldest first.
    pub failures: Vec<E>,
    /// First success, or the last failure when every try failed.
    pub result: Result<T, E>,
}

impl<T, E> Retried<T, E> {
    /// Number of tries actually made.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.failures.len() + 1
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    #[must_use]
    pub fn max_attempts(self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Invoke `op` until it succeeds or the attempt budget is spent.
    ///
    /// `label` only appears in debug logs.
    pub async fn run<T, E, F, Fut>(self, label: &str, mut op: F) -> Retried<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let total = self.max_attempts();
        let mut failures = Vec::new();
        let mut attempt = 1;
        loop {
            tracing::debug!("attempt {attempt}/{total} for {label}");
            match op().await {
                Ok(value) => {
                    return Retried {
                        failures,
                        result: Ok(value),
                    };
                }
                Err(err) if attempt < total => {
                    failures.push(err);
                    attempt += 1;
                }
                Err(err) => {
                    return Retried {
                        failures,
                        result: Err(err),
                    };
                }
            }
        }
    }
}
