pub mod azure;
pub mod mock;
pub mod provider;
pub mod recognizer;
pub mod session;

pub use azure::AzureProvider;
pub use mock::MockTranscriber;
pub use provider::{ProviderSession, RecognitionEvent, SpeechProvider};
pub use recognizer::StreamingRecognizer;
pub use session::NO_SPEECH;
