use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use voxscribe_core::RecognitionError;

/// Asynchronous events delivered by a provider session while recognition runs.
#[derive(Debug, Clone)]
pub enum RecognitionEvent {
    /// An incremental speech fragment; zero or more per session.
    Partial(String),
    /// The provider aborted the session, with its reason.
    Canceled(String),
    /// Normal end of the session.
    Stopped,
}

/// A live recognition session handed out by a [`SpeechProvider`].
///
/// The audio buffer was already pushed and the input stream closed when the
/// session was opened; all that remains is to consume events and stop the
/// remote stream when a terminal event settles the result.
pub struct ProviderSession {
    pub events: mpsc::UnboundedReceiver<RecognitionEvent>,
    stop: Option<oneshot::Sender<()>>,
}

impl ProviderSession {
    pub fn new(
        events: mpsc::UnboundedReceiver<RecognitionEvent>,
        stop: oneshot::Sender<()>,
    ) -> Self {
        Self {
            events,
            stop: Some(stop),
        }
    }

    /// Request the remote stream to stop. Idempotent; later calls are no-ops.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
    }
}

#[async_trait]
pub trait SpeechProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Open a recognition session for one audio clip. The whole buffer is
    /// written to the provider's push stream and the stream closed before
    /// this returns, so short clips can reach a normal stop on their own.
    async fn open_session(
        &self,
        audio: Vec<u8>,
        locale: &str,
    ) -> Result<ProviderSession, RecognitionError>;
}
