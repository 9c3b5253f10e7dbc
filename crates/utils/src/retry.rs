//! Exponential-backoff retry for database writes that lose a write race.

use std::{fmt::Display, future::Future, time::Duration};

use backon::{ExponentialBuilder, Retryable};
use tracing::warn;

/// SQLite lock outcomes that clear on their own: `SQLITE_BUSY` with its
/// `_RECOVERY`, `_SNAPSHOT` and `_TIMEOUT` extended codes, and `SQLITE_LOCKED`.
const CONFLICT_CODES: &[&str] = &["5", "261", "517", "773", "6"];
const CONFLICT_MESSAGE: &str = "write conflict";

/// Errors that can tell whether they were caused by a transient write conflict.
pub trait WriteConflict {
    fn is_write_conflict(&self) -> bool;
}

impl WriteConflict for sqlx::Error {
    fn is_write_conflict(&self) -> bool {
        match self {
            sqlx::Error::Database(db) => {
                db.code()
                    .is_some_and(|code| CONFLICT_CODES.iter().any(|c| *c == code))
                    || mentions_write_conflict(db.message())
            }
            other => mentions_write_conflict(&other.to_string()),
        }
    }
}

fn mentions_write_conflict(message: &str) -> bool {
    message.to_ascii_lowercase().contains(CONFLICT_MESSAGE)
}

/// How many times a conflicting write is retried, and the first delay.
///
/// The delay doubles after every retry: `base_delay`, `2 * base_delay`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: usize,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            base_delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    pub fn new(retries: usize, base_delay: Duration) -> Self {
        Self {
            retries,
            base_delay,
        }
    }

    fn backoff(&self) -> ExponentialBuilder {
        // Cap at the last delay of the schedule so doubling is never clamped early.
        let steps = self.retries.saturating_sub(1).min(31) as u32;
        let max_delay = self.base_delay.saturating_mul(1u32 << steps);

        ExponentialBuilder::default()
            .with_min_delay(self.base_delay)
            .with_max_delay(max_delay)
            .with_factor(2.0)
            .with_max_times(self.retries)
    }
}

/// Run `op`, retrying it while it fails with a write conflict and retries remain.
///
/// Any other error, or the last conflict once the budget is spent, is returned as-is.
pub async fn with_retry<T, E, F, Fut>(policy: &RetryPolicy, op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: WriteConflict + Display,
{
    with_retry_notify(policy, op, |e: &E, delay: Duration| {
        warn!(
            delay = ?delay,
            error = %e,
            "Write conflict, retrying"
        )
    })
    .await
}

/// Same as [`with_retry`], calling `notify` with the error and the upcoming delay
/// before every sleep.
pub async fn with_retry_notify<T, E, F, Fut, N>(
    policy: &RetryPolicy,
    op: F,
    notify: N,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: WriteConflict,
    N: FnMut(&E, Duration),
{
    op.retry(policy.backoff())
        .when(|e: &E| e.is_write_conflict())
        .notify(notify)
        .await
}
