use crate::provider::{ProviderSession, RecognitionEvent};
use crate::session::{SessionState, Terminal};
use std::time::Duration;
use voxscribe_core::{RecognitionError, TranscriptionResult};

const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

/// Drives a provider session to its terminal state.
///
/// Partial results, cancellation, normal stop and the deadline race inside a
/// single `select!` loop, so exactly one of them settles the outcome and the
/// provider stream is stopped on every exit path.
pub struct StreamingRecognizer {
    deadline: Duration,
}

impl StreamingRecognizer {
    pub fn new() -> Self {
        Self::with_deadline(DEFAULT_DEADLINE)
    }

    pub fn with_deadline(deadline: Duration) -> Self {
        Self { deadline }
    }

    /// Consume session events until a terminal transition and return the
    /// recognized text, or the error that ended the session.
    ///
    /// The deadline only forces a timeout while nothing has been recognized;
    /// once any partial arrived, an in-flight completion is allowed to
    /// resolve past it.
    pub async fn run(&self, mut session: ProviderSession) -> Result<String, RecognitionError> {
        let mut state = SessionState::new();
        let deadline = tokio::time::sleep(self.deadline);
        tokio::pin!(deadline);
        let mut deadline_armed = true;

        loop {
            tokio::select! {
                event = session.events.recv() => match event {
                    Some(RecognitionEvent::Partial(text)) => {
                        tracing::debug!(fragment = %text, "partial recognition");
                        state.append(&text);
                    }
                    Some(RecognitionEvent::Canceled(reason)) => {
                        state.settle(Terminal::Canceled);
                        session.stop();
                        tracing::warn!(reason = %reason, "recognition canceled");
                        return Err(RecognitionError::Canceled(reason));
                    }
                    // A dropped sender means the provider went away after
                    // end-of-input; treat it like a normal stop.
                    Some(RecognitionEvent::Stopped) | None => {
                        state.settle(Terminal::Completed);
                        session.stop();
                        let text = state.final_text();
                        tracing::debug!(chars = text.len(), "recognition completed");
                        return Ok(text);
                    }
                },
                _ = &mut deadline, if deadline_armed => {
                    if state.has_speech() {
                        // Speech already arrived; let the in-flight
                        // completion settle the session instead.
                        tracing::debug!("deadline passed with speech accumulated, awaiting completion");
                        deadline_armed = false;
                    } else {
                        state.settle(Terminal::TimedOut);
                        session.stop();
                        tracing::warn!(deadline = ?self.deadline, "recognition deadline expired");
                        return Err(RecognitionError::Timeout);
                    }
                }
            }
        }
    }

    /// Same as [`run`](Self::run), folded into the uniform result envelope.
    pub async fn recognize(&self, session: ProviderSession) -> TranscriptionResult {
        match self.run(session).await {
            Ok(text) => TranscriptionResult::success(text),
            Err(e) => TranscriptionResult::failure(e.to_string()),
        }
    }
}

impl Default for StreamingRecognizer {
    fn default() -> Self {
        Self::new()
    }
}
