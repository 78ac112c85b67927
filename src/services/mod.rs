use std::future::Future;

use crate::config::RetryPolicy;
use crate::error::Result;

pub mod entry_service;
pub mod threshold_service;
pub mod alert_service;
pub mod roster_service;
pub mod analytics_service;

pub use entry_service::EntryService;
pub use threshold_service::ThresholdService;
pub use alert_service::AlertService;
pub use roster_service::RosterService;
pub use analytics_service::{ AnalyticsService, EvaluationReport };

/// Runs `op` until it succeeds, fails with a non-transient error, or the
/// attempt budget runs out. The delay doubles after every failed attempt.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, operation: &str, mut op: F) -> Result<T>
    where F: FnMut() -> Fut, Fut: Future<Output = Result<T>>
{
    let mut attempt: u32 = 1;

    loop {
        match op().await {
            Err(e) if e.is_transient() && attempt < policy.attempts => {
                let delay = policy.base_delay * (1u32 << (attempt - 1).min(16));
                tracing::warn!(
                    "{} failed (attempt {}/{}): {}; retrying in {:?}",
                    operation,
                    attempt,
                    policy.attempts,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            result => {
                return result;
            }
        }
    }
}
