use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;
use voxscribe_core::{AppConfig, TranscriptionRequest};
use voxscribe_engine::{AzureProvider, SpeechProvider, StreamingRecognizer};
use voxscribe_fetch::{AudioFetcher, FetchPolicy, HttpTransport};
use voxscribe_pipeline::{BackoffPolicy, TranscriptionPipeline};

#[derive(Parser)]
#[command(name = "voxscribe", about = "Audio transcription pipeline")]
struct Cli {
    /// URL of the audio resource to transcribe
    audio_url: String,

    /// BCP-47 recognition language (defaults to the configured language)
    #[arg(short, long)]
    locale: Option<String>,

    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from {path:?}"))?,
        None => AppConfig::default(),
    };

    let env_filter =
        EnvFilter::try_new(&config.general.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::Registry::default().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false),
    );

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    tracing::info!("voxscribe starting");

    let credential = config.speech.credential();

    let fetcher = AudioFetcher::with_policy(
        Arc::new(HttpTransport::new()),
        FetchPolicy {
            max_attempts: config.fetch.max_attempts,
            base_delay: Duration::from_millis(config.fetch.base_delay_ms),
        },
    );

    let provider: Arc<dyn SpeechProvider> = Arc::new(AzureProvider::new(credential.clone()));

    let pipeline = TranscriptionPipeline::new(credential, fetcher, provider)
        .with_recognizer(StreamingRecognizer::with_deadline(Duration::from_secs(
            config.recognition.deadline_secs,
        )))
        .with_backoff(BackoffPolicy {
            max_attempts: config.recognition.max_attempts,
            base_delay: Duration::from_millis(config.recognition.base_delay_ms),
            multiplier: 2,
        });

    let locale = cli.locale.unwrap_or_else(|| config.speech.language.clone());
    let request = TranscriptionRequest::new(cli.audio_url, Some(locale));

    tracing::info!(
        url = %request.audio_url,
        locale = %request.locale,
        source = %pipeline.source(),
        "transcribing"
    );

    let result = pipeline.transcribe(&request).await;

    if let Some(record) = pipeline.record_for(&request, &result) {
        tracing::info!(source = %record.source, "transcription ready for persistence");
    } else {
        tracing::warn!("transcription failed, nothing to persist");
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
