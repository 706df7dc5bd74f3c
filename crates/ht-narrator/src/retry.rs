//! Bounded retry with doubling backoff.

use std::time::Duration;

use tracing::warn;

use crate::error::{NarratorError, NarratorResult};

/// How often and how patiently a request is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Delay after the first failure; doubles after each further failure.
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let doublings = attempt.saturating_sub(1).min(16);
        self.initial_backoff.saturating_mul(1 << doublings)
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// attempts run out. `op` receives the 1-based attempt number.
    pub fn run<T>(
        &self,
        mut op: impl FnMut(u32) -> NarratorResult<T>,
        mut sleep: impl FnMut(Duration),
    ) -> NarratorResult<T> {
        let max = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) if attempt >= max => {
                    return Err(NarratorError::RetriesExhausted {
                        attempts: attempt,
                        last: Box::new(e),
                    });
                }
                Err(e) => {
                    let delay = self.backoff(attempt);
                    warn!(attempt, max, ?delay, error = %e, "narrator request failed, retrying");
                    sleep(delay);
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_error() -> NarratorError {
        NarratorError::Status {
            status: 503,
            body: String::new(),
        }
    }

    #[test]
    fn backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_secs(1));
        assert_eq!(policy.backoff(2), Duration::from_secs(2));
        assert_eq!(policy.backoff(3), Duration::from_secs(4));
    }

    #[test]
    fn succeeds_after_transient_failures() {
        let policy = RetryPolicy::default();
        let mut slept = Vec::new();
        let result = policy.run(
            |attempt| if attempt < 3 { Err(server_error()) } else { Ok(attempt) },
            |d| slept.push(d),
        );
        assert_eq!(result.unwrap(), 3);
        assert_eq!(slept, vec![Duration::from_secs(1), Duration::from_secs(2)]);
    }

    #[test]
    fn exhausts() {
        let policy = RetryPolicy::default();
        let mut calls = 0;
        let result: NarratorResult<()> = policy.run(
            |_| {
                calls += 1;
                Err(NarratorError::ModelLoading)
            },
            |_| {},
        );
        assert_eq!(calls, 3);
        assert!(matches!(
            result,
            Err(NarratorError::RetriesExhausted { attempts: 3, .. })
        ));
    }

    #[test]
    fn fatal_error_stops_immediately() {
        let policy = RetryPolicy::default();
        let mut calls = 0;
        let result: NarratorResult<()> = policy.run(
            |_| {
                calls += 1;
                Err(NarratorError::Status {
                    status: 401,
                    body: "unauthorized".into(),
                })
            },
            |_| panic!("must not sleep"),
        );
        assert_eq!(calls, 1);
        assert!(matches!(result, Err(NarratorError::Status { status: 401, .. })));
    }

    #[test]
    fn zero_attempts_still_tries_once() {
        let policy = RetryPolicy {
            max_attempts: 0,
            initial_backoff: Duration::ZERO,
        };
        let mut calls = 0;
        let _ = policy.run(
            |_| -> NarratorResult<()> {
                calls += 1;
                Err(server_error())
            },
            |_| {},
        );
        assert_eq!(calls, 1);
    }
}
