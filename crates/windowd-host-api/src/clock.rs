//! Clock trait and the system clock

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// How a sleep ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepOutcome {
    /// The full duration passed
    Elapsed,
    /// The cancellation token fired first
    Cancelled,
}

/// Source of UTC time and cancellable sleeps
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Sleep for `duration`, returning early if `cancel` fires
    async fn sleep(&self, duration: Duration, cancel: &CancellationToken) -> SleepOutcome;
}

/// Real UTC wall clock backed by tokio timers
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        windowd_util::now()
    }

    async fn sleep(&self, duration: Duration, cancel: &CancellationToken) -> SleepOutcome {
        tokio::select! {
            _ = cancel.cancelled() => SleepOutcome::Cancelled,
            _ = tokio::time::sleep(duration) => SleepOutcome::Elapsed,
        }
    }
}
