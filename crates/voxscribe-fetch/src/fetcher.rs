use crate::transport::AudioTransport;
use std::sync::Arc;
use std::time::Duration;
use voxscribe_core::FetchError;

/// Bounded linear-backoff retry for audio downloads.
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

pub struct AudioFetcher {
    transport: Arc<dyn AudioTransport>,
    policy: FetchPolicy,
}

impl AudioFetcher {
    pub fn new(transport: Arc<dyn AudioTransport>) -> Self {
        Self::with_policy(transport, FetchPolicy::default())
    }

    pub fn with_policy(transport: Arc<dyn AudioTransport>, policy: FetchPolicy) -> Self {
        Self { transport, policy }
    }

    /// Retrieve the audio bytes at `url`, retrying with a delay of
    /// `base_delay * attempt` between attempts.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        if url.is_empty() {
            return Err(FetchError::EmptyUrl);
        }

        let mut last_error = String::new();

        for attempt in 1..=self.policy.max_attempts {
            tracing::debug!(url, attempt, "downloading audio");

            match self.transport.get(url).await {
                Ok(bytes) => {
                    tracing::debug!(url, bytes = bytes.len(), "audio downloaded");
                    return Ok(bytes);
                }
                Err(e) => {
                    last_error = e.to_string();
                    tracing::warn!(
                        url,
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        "audio download failed: {e}"
                    );
                    if attempt < self.policy.max_attempts {
                        tokio::time::sleep(self.policy.base_delay * attempt).await;
                    }
                }
            }
        }

        Err(FetchError::RetriesExhausted {
            attempts: self.policy.max_attempts,
            last_error,
        })
    }
}
