use crate::error::ConfigError;
use crate::types::Credential;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub speech: SpeechConfig,

    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub recognition: RecognitionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SpeechConfig {
    #[serde(default)]
    pub key: String,

    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            region: default_region(),
            language: default_language(),
        }
    }
}

impl SpeechConfig {
    pub fn credential(&self) -> Credential {
        Credential::new(self.key.clone(), self.region.clone())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    #[serde(default = "default_fetch_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_fetch_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecognitionConfig {
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,

    #[serde(default = "default_recognition_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            deadline_secs: default_deadline_secs(),
            max_attempts: default_recognition_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_region() -> String {
    "eastus".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_fetch_attempts() -> u32 {
    3
}

fn default_recognition_attempts() -> u32 {
    4
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_deadline_secs() -> u64 {
    30
}

/// Interpolate `${VAR}` patterns with environment variable values.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    let mut result = input.to_string();
    let mut errors = Vec::new();

    for cap in re.captures_iter(input) {
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(val) => {
                result = result.replace(&cap[0], &val);
            }
            Err(_) => {
                errors.push(var_name.to_string());
            }
        }
    }

    if let Some(first_missing) = errors.into_iter().next() {
        return Err(ConfigError::EnvVarNotFound(first_missing));
    }

    Ok(result)
}

impl AppConfig {
    /// Load configuration from a TOML file, with environment variable interpolation.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let interpolated = interpolate_env_vars(&content)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }

    /// Parse configuration from a TOML string (for testing).
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let interpolated = interpolate_env_vars(s)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }
}
