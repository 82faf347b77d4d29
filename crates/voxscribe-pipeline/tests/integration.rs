use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use voxscribe_core::{Credential, FetchError, RecognitionError, TranscriptionRequest};
use voxscribe_engine::{
    MockTranscriber, ProviderSession, RecognitionEvent, SpeechProvider, StreamingRecognizer,
};
use voxscribe_fetch::{AudioFetcher, AudioTransport, FetchPolicy};
use voxscribe_pipeline::{BackoffPolicy, TranscriptionPipeline};

struct OkTransport;

#[async_trait]
impl AudioTransport for OkTransport {
    async fn get(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
        Ok(b"RIFF....WAVE".to_vec())
    }
}

/// Provider that refuses to open the first `fail_first` sessions, then
/// scripts a clean partial + stop.
struct FlakyProvider {
    fail_first: u32,
    opens: AtomicU32,
    transcript: String,
}

impl FlakyProvider {
    fn new(fail_first: u32, transcript: &str) -> Self {
        Self {
            fail_first,
            opens: AtomicU32::new(0),
            transcript: transcript.to_string(),
        }
    }

    fn opens(&self) -> u32 {
        self.opens.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SpeechProvider for FlakyProvider {
    fn name(&self) -> &str {
        "flaky"
    }

    async fn open_session(
        &self,
        _audio: Vec<u8>,
        _locale: &str,
    ) -> Result<ProviderSession, RecognitionError> {
        let open = self.opens.fetch_add(1, Ordering::Relaxed) + 1;
        if open <= self.fail_first {
            return Err(RecognitionError::SessionFailed(format!(
                "simulated session failure {open}"
            )));
        }

        let (ev_tx, ev_rx) = mpsc::unbounded_channel();
        let (stop_tx, _stop_rx) = oneshot::channel();
        ev_tx
            .send(RecognitionEvent::Partial(self.transcript.clone()))
            .unwrap();
        ev_tx.send(RecognitionEvent::Stopped).unwrap();
        Ok(ProviderSession::new(ev_rx, stop_tx))
    }
}

fn usable_credential() -> Credential {
    Credential::new("0123456789abcdef0123456789abcdef", "eastus")
}

fn fast_fetcher() -> AudioFetcher {
    AudioFetcher::with_policy(
        Arc::new(OkTransport),
        FetchPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
        },
    )
}

fn fast_backoff() -> BackoffPolicy {
    BackoffPolicy {
        max_attempts: 4,
        base_delay: Duration::from_millis(1),
        multiplier: 2,
    }
}

fn fast_mock() -> MockTranscriber {
    MockTranscriber::with_delay(Duration::from_millis(0))
}

#[tokio::test]
async fn test_empty_key_routes_to_mock_for_any_url() {
    let provider = Arc::new(FlakyProvider::new(0, "real text"));
    let pipeline = TranscriptionPipeline::new(
        Credential::new("", "eastus"),
        fast_fetcher(),
        Arc::clone(&provider) as _,
    )
    .with_mock(fast_mock());

    for url in ["https://x/a.wav", "https://elsewhere/clip.ogg"] {
        let request = TranscriptionRequest::new(url, None);
        let result = pipeline.transcribe(&request).await;
        assert!(result.is_success());
        assert!(result.transcription().unwrap().starts_with("[Azure Mock]"));
    }
    assert_eq!(provider.opens(), 0);
}

#[tokio::test]
async fn test_short_key_routes_to_mock() {
    let provider = Arc::new(FlakyProvider::new(0, "real text"));
    let pipeline = TranscriptionPipeline::new(
        Credential::new("tiny", "eastus"),
        fast_fetcher(),
        Arc::clone(&provider) as _,
    )
    .with_mock(fast_mock());

    let request = TranscriptionRequest::new("https://x/a.wav", None);
    let result = pipeline.transcribe(&request).await;
    assert!(result.is_success());
    assert!(result.transcription().unwrap().starts_with("[Azure Mock]"));
    assert_eq!(provider.opens(), 0);
}

#[tokio::test]
async fn test_valid_key_takes_real_path() {
    let provider = Arc::new(FlakyProvider::new(0, "spoken words"));
    let pipeline = TranscriptionPipeline::new(
        usable_credential(),
        fast_fetcher(),
        Arc::clone(&provider) as _,
    )
    .with_backoff(fast_backoff());

    let request = TranscriptionRequest::new("https://x/a.wav", None);
    let result = pipeline.transcribe(&request).await;
    assert!(result.is_success());
    assert_eq!(result.transcription(), Some("spoken words"));
    assert_eq!(provider.opens(), 1);
}

#[tokio::test]
async fn test_three_failures_then_success_on_fourth_attempt() {
    let provider = Arc::new(FlakyProvider::new(3, "finally"));
    let pipeline = TranscriptionPipeline::new(
        usable_credential(),
        fast_fetcher(),
        Arc::clone(&provider) as _,
    )
    .with_backoff(fast_backoff());

    let request = TranscriptionRequest::new("https://x/a.wav", None);
    let result = pipeline.transcribe(&request).await;
    assert!(result.is_success());
    assert_eq!(result.transcription(), Some("finally"));
    assert_eq!(provider.opens(), 4);
}

#[tokio::test]
async fn test_always_failing_real_path_fails_after_four_attempts() {
    let provider = Arc::new(FlakyProvider::new(u32::MAX, "unreachable"));
    let pipeline = TranscriptionPipeline::new(
        usable_credential(),
        fast_fetcher(),
        Arc::clone(&provider) as _,
    )
    .with_backoff(fast_backoff());

    let request = TranscriptionRequest::new("https://x/a.wav", None);
    let result = pipeline.transcribe(&request).await;
    assert!(!result.is_success());
    assert!(result.error().unwrap().contains("simulated session failure 4"));
    assert_eq!(provider.opens(), 4);
}

#[tokio::test]
async fn test_fetch_errors_also_consume_outer_attempts() {
    struct DownTransport;

    #[async_trait]
    impl AudioTransport for DownTransport {
        async fn get(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
            Err(FetchError::Transport("cdn unreachable".to_string()))
        }
    }

    let provider = Arc::new(FlakyProvider::new(0, "unused"));
    let fetcher = AudioFetcher::with_policy(
        Arc::new(DownTransport),
        FetchPolicy {
            max_attempts: 2,
            base_delay: Duration::from_millis(1),
        },
    );
    let pipeline =
        TranscriptionPipeline::new(usable_credential(), fetcher, Arc::clone(&provider) as _)
            .with_backoff(fast_backoff());

    let request = TranscriptionRequest::new("https://x/a.wav", None);
    let result = pipeline.transcribe(&request).await;
    assert!(!result.is_success());
    assert!(result.error().unwrap().contains("cdn unreachable"));
    // The provider is never reached when every fetch fails.
    assert_eq!(provider.opens(), 0);
}

#[tokio::test]
async fn test_recognizer_timeout_is_retried_and_surfaced() {
    // Sessions that never produce events force the recognizer deadline.
    struct SilentProvider {
        opens: AtomicU32,
        holders: std::sync::Mutex<Vec<mpsc::UnboundedSender<RecognitionEvent>>>,
    }

    #[async_trait]
    impl SpeechProvider for SilentProvider {
        fn name(&self) -> &str {
            "silent"
        }

        async fn open_session(
            &self,
            _audio: Vec<u8>,
            _locale: &str,
        ) -> Result<ProviderSession, RecognitionError> {
            self.opens.fetch_add(1, Ordering::Relaxed);
            let (ev_tx, ev_rx) = mpsc::unbounded_channel();
            let (stop_tx, _stop_rx) = oneshot::channel();
            // Keep the sender alive so the channel never closes.
            self.holders.lock().unwrap().push(ev_tx);
            Ok(ProviderSession::new(ev_rx, stop_tx))
        }
    }

    let provider = Arc::new(SilentProvider {
        opens: AtomicU32::new(0),
        holders: std::sync::Mutex::new(Vec::new()),
    });
    let pipeline = TranscriptionPipeline::new(
        usable_credential(),
        fast_fetcher(),
        Arc::clone(&provider) as _,
    )
    .with_backoff(fast_backoff())
    .with_recognizer(StreamingRecognizer::with_deadline(Duration::from_millis(10)));

    let request = TranscriptionRequest::new("https://x/a.wav", None);
    let result = pipeline.transcribe(&request).await;
    assert!(!result.is_success());
    assert!(result.error().unwrap().contains("timeout"));
    assert_eq!(provider.opens.load(Ordering::Relaxed), 4);
}

#[tokio::test]
async fn test_end_to_end_french_mock_transcription() {
    let provider = Arc::new(FlakyProvider::new(0, "unused"));
    let pipeline = TranscriptionPipeline::new(
        Credential::new("", "eastus"),
        fast_fetcher(),
        Arc::clone(&provider) as _,
    )
    .with_mock(fast_mock());

    let request = TranscriptionRequest::new("https://x/a.wav", Some("fr-FR".to_string()));
    let result = pipeline.transcribe(&request).await;

    assert!(result.is_success());
    let text = result.transcription().unwrap();
    assert!(text.starts_with("[Azure Mock] Bonjour, ceci est une transcription réaliste en français"));

    let record = pipeline.record_for(&request, &result).unwrap();
    assert_eq!(record.source.to_string(), "mock");
    assert_eq!(record.audio_url, "https://x/a.wav");
}
