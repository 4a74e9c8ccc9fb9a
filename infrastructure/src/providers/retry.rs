//! Bounded retry with exponential backoff for judge calls
//!
//! Only failures classified as transient by [`JudgeError::is_transient`]
//! are retried. Client errors (every 4xx) and configuration problems
//! surface on the first attempt.

use council_application::JudgeError;
use council_domain::RetryPolicy;
use std::future::Future;
use tracing::warn;

/// Run `operation` until it succeeds, fails permanently, or the budget runs out
///
/// The final error is returned unchanged once the budget is exhausted.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    judge: &str,
    mut operation: F,
) -> Result<T, JudgeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, JudgeError>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && policy.allows_retry_after(attempt) => {
                let delay = policy.backoff_for(attempt);
                warn!(
                    judge,
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "Transient judge failure, retrying: {}",
                    e
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                if e.is_transient() {
                    warn!(judge, attempt, "Retry budget exhausted: {}", e);
                }
                return Err(e);
            }
        }
    }
}
