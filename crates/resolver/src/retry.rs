//! Retrying source calls.

use crate::config::RetryPolicy;
use sources::SourceError;
use std::future::Future;
use tracing::warn;

/// Run `op` until it succeeds, fails non-transiently, or the policy runs out
/// of attempts. The last error is returned unchanged.
pub(crate) async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    what: &str,
    actor_id: &str,
    mut op: F,
) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SourceError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < max_attempts => {
                let delay = policy.delay_for(attempt);
                warn!(
                    actor_id,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "Fetching {} failed, retrying: {}",
                    what,
                    err
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                if err.is_transient() {
                    warn!(actor_id, attempts = attempt, "Giving up on {}: {}", what, err);
                }
                return Err(err);
            }
        }
    }
}
