use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("audio URL is empty")]
    EmptyUrl,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to download audio after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
}

#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("recognition canceled: {0}")]
    Canceled(String),

    #[error("recognition timeout: no speech detected within the deadline")]
    Timeout,

    #[error("failed to open recognition session: {0}")]
    SessionFailed(String),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Recognition(#[from] RecognitionError),

    #[error("all {attempts} transcription attempts failed: {last_error}")]
    AttemptsExhausted { attempts: u32, last_error: String },
}
