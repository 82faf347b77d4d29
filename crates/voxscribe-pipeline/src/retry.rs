use rand::Rng;
use std::future::Future;
use std::time::Duration;
use voxscribe_core::PipelineError;

/// Exponential backoff with full jitter for the outer transcription retry.
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub multiplier: u32,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(1000),
            multiplier: 2,
        }
    }
}

/// Run `operation` until it succeeds or the attempt budget is spent.
///
/// The delay before retry n is `base_delay * multiplier^(n-1)`, with a full
/// jitter draw over `0..=delay`, so concurrent failures do not retry in
/// lockstep.
pub async fn with_backoff<T, F, Fut>(
    operation_name: &str,
    policy: &BackoffPolicy,
    operation: F,
) -> Result<T, PipelineError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, PipelineError>>,
{
    let mut delay = policy.base_delay;
    let mut last_error = String::new();

    for attempt in 1..=policy.max_attempts {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                last_error = e.to_string();
                if attempt < policy.max_attempts {
                    let jittered = full_jitter(delay);
                    tracing::warn!(
                        attempt,
                        max_attempts = policy.max_attempts,
                        "{operation_name} attempt failed: {e}, retrying in {jittered:?}"
                    );
                    tokio::time::sleep(jittered).await;
                    delay *= policy.multiplier;
                } else {
                    tracing::error!(
                        attempts = policy.max_attempts,
                        "{operation_name} failed: {e}"
                    );
                }
            }
        }
    }

    Err(PipelineError::AttemptsExhausted {
        attempts: policy.max_attempts,
        last_error,
    })
}

fn full_jitter(delay: Duration) -> Duration {
    let max_ms = delay.as_millis() as u64;
    if max_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::rng().random_range(0..=max_ms))
}
