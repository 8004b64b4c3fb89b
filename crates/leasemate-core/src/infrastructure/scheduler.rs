use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::models::Scheduler;

/// Real clock and timers.
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn now(&self) -> DateTime<Utc> {
        return Utc::now();
    }
}

/// Scheduler that yields instead of sleeping, so timer-driven workflows run
/// to completion immediately in tests.
pub struct NoDelayScheduler;

#[async_trait]
impl Scheduler for NoDelayScheduler {
    async fn sleep(&self, _duration: Duration) {
        tokio::task::yield_now().await;
    }

    fn now(&self) -> DateTime<Utc> {
        return Utc::now();
    }
}
