// Retry logic with exponential backoff
//
// Lives in the HTTP adapter, not in the engine: the engine treats a failed
// completion as final.

use anyhow::Result;
use std::time::Duration;
use tokio::time::sleep;

const MAX_RETRIES: u32 = 3;
const BASE_DELAY_MS: u64 = 1000;

/// HTTP status failure reported by an adapter.
///
/// Client errors (4xx other than 429) are not retried: a bad key or a rejected
/// request will not get better by asking again.
#[derive(Debug, thiserror::Error)]
#[error("completion request failed\n\nStatus: {status}\nBody: {body}")]
pub struct HttpStatusError {
    pub status: u16,
    pub body: String,
}

impl HttpStatusError {
    pub fn is_retryable(&self) -> bool {
        self.status == 429 || self.status >= 500
    }
}

fn is_retryable(err: &anyhow::Error) -> bool {
    err.downcast_ref::<HttpStatusError>()
        .map(HttpStatusError::is_retryable)
        .unwrap_or(true)
}

/// Execute a function with exponential backoff retry logic
pub async fn with_retry<F, Fut, T>(f: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    with_retry_config(MAX_RETRIES, Duration::from_millis(BASE_DELAY_MS), f).await
}

/// Same as [`with_retry`] with explicit attempt count and base delay.
pub async fn with_retry_config<F, Fut, T>(max_attempts: u32, base_delay: Duration, f: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 0;

    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                attempt += 1;
                if attempt >= max_attempts || !is_retryable(&e) {
                    return Err(e);
                }

                let delay = base_delay * 2u32.pow(attempt - 1);
                tracing::warn!(
                    "Request failed (attempt {}/{}), retrying in {:?}: {}",
                    attempt,
                    max_attempts,
                    delay,
                    e
                );
                sleep(delay).await;
            }
        }
    }
}
