pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{ConfigError, FetchError, PipelineError, RecognitionError};
pub use types::{
    Credential, TranscriptionRecord, TranscriptionRequest, TranscriptionResult,
    TranscriptionSource, MIN_KEY_LEN,
};
