use crate::retry::{with_backoff, BackoffPolicy};
use std::sync::Arc;
use voxscribe_core::{
    Credential, PipelineError, TranscriptionRecord, TranscriptionRequest, TranscriptionResult,
    TranscriptionSource,
};
use voxscribe_engine::{MockTranscriber, SpeechProvider, StreamingRecognizer};
use voxscribe_fetch::AudioFetcher;

/// Entry point of the transcription core.
///
/// Decides mock-vs-real mode from the injected credential, wraps the real
/// fetch + recognize sequence in outer backoff, and always returns the
/// uniform result envelope; no error escapes [`transcribe`](Self::transcribe).
pub struct TranscriptionPipeline {
    credential: Credential,
    fetcher: AudioFetcher,
    provider: Arc<dyn SpeechProvider>,
    recognizer: StreamingRecognizer,
    mock: MockTranscriber,
    backoff: BackoffPolicy,
}

impl TranscriptionPipeline {
    pub fn new(
        credential: Credential,
        fetcher: AudioFetcher,
        provider: Arc<dyn SpeechProvider>,
    ) -> Self {
        Self {
            credential,
            fetcher,
            provider,
            recognizer: StreamingRecognizer::new(),
            mock: MockTranscriber::new(),
            backoff: BackoffPolicy::default(),
        }
    }

    pub fn with_recognizer(mut self, recognizer: StreamingRecognizer) -> Self {
        self.recognizer = recognizer;
        self
    }

    pub fn with_mock(mut self, mock: MockTranscriber) -> Self {
        self.mock = mock;
        self
    }

    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Which path this pipeline will take; fixed by the credential, never
    /// re-evaluated per attempt.
    pub fn source(&self) -> TranscriptionSource {
        if self.credential.is_usable() {
            TranscriptionSource::Azure
        } else {
            TranscriptionSource::Mock
        }
    }

    pub async fn transcribe(&self, request: &TranscriptionRequest) -> TranscriptionResult {
        match self.source() {
            TranscriptionSource::Mock => {
                tracing::info!(
                    locale = %request.locale,
                    "no usable speech credential, using mock transcription"
                );
                let text = self.mock.transcribe(&request.locale).await;
                TranscriptionResult::success(text)
            }
            TranscriptionSource::Azure => {
                let outcome = with_backoff("transcription", &self.backoff, || {
                    self.attempt(request)
                })
                .await;

                match outcome {
                    Ok(text) => TranscriptionResult::success(text),
                    Err(PipelineError::AttemptsExhausted { last_error, .. }) => {
                        TranscriptionResult::failure(last_error)
                    }
                    Err(e) => TranscriptionResult::failure(e.to_string()),
                }
            }
        }
    }

    /// One real-mode attempt: fetch the clip, open a provider session, run
    /// the recognizer to its terminal state.
    async fn attempt(&self, request: &TranscriptionRequest) -> Result<String, PipelineError> {
        let audio = self.fetcher.fetch(&request.audio_url).await?;
        let session = self
            .provider
            .open_session(audio, &request.locale)
            .await?;
        let text = self.recognizer.run(session).await?;
        Ok(text)
    }

    /// Build the record handed to the persistence collaborator. `None` for
    /// failed runs; those are never persisted.
    pub fn record_for(
        &self,
        request: &TranscriptionRequest,
        result: &TranscriptionResult,
    ) -> Option<TranscriptionRecord> {
        result.transcription().map(|text| TranscriptionRecord {
            audio_url: request.audio_url.clone(),
            transcription: text.to_string(),
            source: self.source(),
        })
    }
}
