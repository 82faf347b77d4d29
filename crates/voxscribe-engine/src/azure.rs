use crate::provider::{ProviderSession, RecognitionEvent, SpeechProvider};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::{mpsc, oneshot};
use voxscribe_core::{Credential, RecognitionError};

/// Response of the Azure short-audio recognition endpoint (simple format).
#[derive(Debug, Deserialize)]
struct AzureRecognition {
    #[serde(rename = "RecognitionStatus")]
    status: String,

    #[serde(rename = "DisplayText", default)]
    display_text: Option<String>,
}

/// Azure Speech-to-Text adapter behind the provider boundary.
///
/// The clip is pushed as one request body and the input stream closed by
/// completing the request; the provider's answer is then translated into the
/// session event stream, so the recognizer never sees the transport.
pub struct AzureProvider {
    credential: Credential,
    client: reqwest::Client,
}

impl AzureProvider {
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, locale: &str) -> String {
        format!(
            "https://{}.stt.speech.microsoft.com/speech/recognition/conversation/cognitiveservices/v1?language={}&format=simple",
            self.credential.region, locale
        )
    }
}

#[async_trait]
impl SpeechProvider for AzureProvider {
    fn name(&self) -> &str {
        "azure"
    }

    async fn open_session(
        &self,
        audio: Vec<u8>,
        locale: &str,
    ) -> Result<ProviderSession, RecognitionError> {
        if !self.credential.is_usable() {
            return Err(RecognitionError::SessionFailed(
                "speech credential is not configured".to_string(),
            ));
        }

        let (ev_tx, ev_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = oneshot::channel();

        let request = self
            .client
            .post(self.endpoint(locale))
            .header("Ocp-Apim-Subscription-Key", self.credential.key.clone())
            .header("Content-Type", "audio/wav")
            .header("Accept", "application/json")
            .body(audio);

        tracing::debug!(region = %self.credential.region, locale, "opening azure recognition session");

        tokio::spawn(async move {
            let response = tokio::select! {
                // The recognizer asked to stop; abandon the in-flight call.
                _ = stop_rx => {
                    tracing::debug!("azure session stopped before the provider answered");
                    return;
                }
                response = request.send() => response,
            };

            match response {
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();

                    if !status.is_success() {
                        let _ = ev_tx.send(RecognitionEvent::Canceled(format!(
                            "azure returned HTTP {status}"
                        )));
                        return;
                    }

                    match serde_json::from_str::<AzureRecognition>(&body) {
                        Ok(recognition) => match recognition.status.as_str() {
                            "Success" => {
                                if let Some(text) = recognition.display_text {
                                    let _ = ev_tx.send(RecognitionEvent::Partial(text));
                                }
                                let _ = ev_tx.send(RecognitionEvent::Stopped);
                            }
                            // The clip contained no recognizable speech;
                            // that is a normal stop, not a cancellation.
                            "NoMatch" | "InitialSilenceTimeout" => {
                                let _ = ev_tx.send(RecognitionEvent::Stopped);
                            }
                            other => {
                                let _ = ev_tx.send(RecognitionEvent::Canceled(format!(
                                    "azure recognition status: {other}"
                                )));
                            }
                        },
                        Err(e) => {
                            let _ = ev_tx.send(RecognitionEvent::Canceled(format!(
                                "unreadable azure response: {e}"
                            )));
                        }
                    }
                }
                Err(e) => {
                    let _ = ev_tx.send(RecognitionEvent::Canceled(format!(
                        "azure request failed: {e}"
                    )));
                }
            }
        });

        Ok(ProviderSession::new(ev_rx, stop_tx))
    }
}
