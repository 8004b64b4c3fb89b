use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

/// Clock and timer seam for the controllers.
///
/// The upload controller's cosmetic progress ticker and post-completion reset
/// both run on timers; injecting them here lets tests run the full workflows
/// without real delays.
#[async_trait]
pub trait Scheduler: Send + Sync {
    async fn sleep(&self, duration: Duration);
    fn now(&self) -> DateTime<Utc>;
}
