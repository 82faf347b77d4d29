use serde::Serialize;

/// Minimum subscription key length for the credential to count as configured.
/// Anything shorter routes every request to the mock transcriber.
pub const MIN_KEY_LEN: usize = 20;

/// Immutable input to one transcription run.
#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    pub audio_url: String,
    pub locale: String,
}

impl TranscriptionRequest {
    pub fn new(audio_url: impl Into<String>, locale: Option<String>) -> Self {
        Self {
            audio_url: audio_url.into(),
            locale: locale.unwrap_or_else(|| "en-US".to_string()),
        }
    }
}

/// The single outcome envelope returned by every transcription path.
///
/// Exactly one of `transcription` / `error` is populated; the constructors
/// are the only way to build one, so the invariant holds everywhere.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptionResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    transcription: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl TranscriptionResult {
    pub fn success(transcription: impl Into<String>) -> Self {
        Self {
            success: true,
            transcription: Some(transcription.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            transcription: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn transcription(&self) -> Option<&str> {
        self.transcription.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Process-wide speech credential, read once at startup.
#[derive(Debug, Clone)]
pub struct Credential {
    pub key: String,
    pub region: String,
}

impl Credential {
    pub fn new(key: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            region: region.into(),
        }
    }

    /// A key below the length floor is treated as absent.
    pub fn is_usable(&self) -> bool {
        self.key.len() >= MIN_KEY_LEN
    }
}

/// Which path produced a transcription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionSource {
    Azure,
    Mock,
}

impl std::fmt::Display for TranscriptionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptionSource::Azure => write!(f, "azure"),
            TranscriptionSource::Mock => write!(f, "mock"),
        }
    }
}

/// What the caller hands to the persistence layer after a successful run.
/// Identifier and timestamp are assigned by that layer, not here.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptionRecord {
    pub audio_url: String,
    pub transcription: String,
    pub source: TranscriptionSource,
}
