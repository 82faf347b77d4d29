use async_trait::async_trait;
use voxscribe_core::FetchError;

/// One raw retrieval of an audio resource. Retry policy lives in
/// [`AudioFetcher`](crate::AudioFetcher), not here.
#[async_trait]
pub trait AudioTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioTransport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport(format!("HTTP {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
