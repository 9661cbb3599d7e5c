use std::future::Future;
use std::time::Duration;


/// Exponential backoff for the connection layer.
/// Attempt `n` (1-based) that fails is followed by a pause of `base_delay * multiplier^(n-1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 5,
            base_delay: Duration::from_millis(200),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        RetryPolicy { max_attempts: max_attempts.max(1), base_delay, ..Default::default() }
    }

    /// Pause after the failed attempt number `attempt`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1) as i32;
        self.base_delay.mul_f64(self.multiplier.powi(exponent))
    }

    /// Run `op` until it succeeds or the attempts run out.
    /// Returns the last error together with the number of attempts made.
    pub async fn run<T, E, F, Fut>(&self, what: &str, mut op: F) -> Result<T, (u32, E)>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= max_attempts => {
                    tracing::error!("{what} failed after {attempt} attempt(s): {e}");
                    return Err((attempt, e));
                }
                Err(e) => {
                    let delay = self.delay_after(attempt);
                    tracing::warn!("{what} failed (attempt {attempt}/{max_attempts}), retrying in {delay:?}: {e}");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
