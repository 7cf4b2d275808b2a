//! Retry with exponential back-off and jitter for the Sheets client.
//!
//! [`retry_with_backoff`] wraps any fallible async operation and retries on
//! transient errors (network failures, 429, 5xx). Everything else is returned
//! immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::SheetsError;

/// Upper bound for a single back-off sleep.
const MAX_DELAY_MS: u64 = 60_000;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection refused/reset.
/// - [`SheetsError::RateLimited`]: HTTP 429, quota window exhausted.
/// - HTTP 5xx, whether or not the body carried an error envelope.
///
/// **Not retriable:** 404, other 4xx, malformed bodies, a bad base URL.
pub(crate) fn is_retriable(err: &SheetsError) -> bool {
    match err {
        SheetsError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        SheetsError::RateLimited { .. } => true,
        SheetsError::Api { status, .. } | SheetsError::UnexpectedStatus { status, .. } => {
            *status >= 500
        }
        SheetsError::NotFound { .. }
        | SheetsError::Deserialize { .. }
        | SheetsError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 1_000`:
///
/// | Attempt | Sleep before next attempt        |
/// |---------|----------------------------------|
/// | 1       | 1 000 ms × 2⁰ ± 25 % jitter     |
/// | 2       | 1 000 ms × 2¹ ± 25 % jitter     |
/// | 3       | 1 000 ms × 2² ± 25 % jitter     |
///
/// A `Retry-After` hint on a 429 raises the delay to at least that long.
/// Delay is capped at 60 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, SheetsError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SheetsError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let jittered = (computed as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                let hinted = match &err {
                    SheetsError::RateLimited {
                        retry_after_secs: Some(secs),
                    } => secs.saturating_mul(1_000),
                    _ => 0,
                };
                let delay_ms = jittered.max(hinted).min(MAX_DELAY_MS);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient Sheets API error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
