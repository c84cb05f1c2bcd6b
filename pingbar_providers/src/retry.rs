use std::fmt::Display;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Retry an async operation, sleeping `delays[i]` before attempt `i + 2`.
///
/// Errors for which `should_retry` returns `false` are returned immediately.
/// After `delays.len()` retries the last error is returned.
pub async fn retry_with_backoff<F, Fut, T, E, P>(
    mut operation: F,
    delays: &[Duration],
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: Display,
    P: Fn(&E) -> bool,
{
    let attempts = delays.len() + 1;
    let mut delays = delays.iter();
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                let Some(delay) = delays.next().filter(|_| should_retry(&e)) else {
                    return Err(e);
                };
                warn!(
                    "Request failed (attempt {attempt}/{attempts}): {e}. Retrying after {}ms...",
                    delay.as_millis()
                );
                sleep(*delay).await;
                attempt += 1;
            }
        }
    }
}
