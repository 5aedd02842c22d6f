use std::fmt::Display;
use std::future::Future;
use tracing::warn;

/// Every attempt failed. Only the last attempt's error is kept.
#[derive(Debug)]
pub struct RetryError<E> {
    pub attempts: u32,
    pub last: E,
}

/// Runs `op` up to `max_attempts` times in sequence, without delay, and
/// returns the first success.
///
/// `op` receives the 1-based attempt number. A `max_attempts` of zero is
/// treated as one attempt.
pub async fn retry<T, E, F, Fut>(max_attempts: u32, mut op: F) -> Result<T, RetryError<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= max_attempts => {
                return Err(RetryError {
                    attempts: attempt,
                    last: e,
                });
            }
            Err(e) => {
                warn!(attempt, max_attempts, "Attempt failed, retrying: {}", e);
                attempt += 1;
            }
        }
    }
}
