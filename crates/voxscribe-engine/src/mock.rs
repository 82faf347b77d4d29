use std::time::Duration;

const DEFAULT_LOCALE: &str = "en-US";
const DEFAULT_DELAY: Duration = Duration::from_millis(1200);

/// Canned transcripts keyed by locale, tagged as synthetic output.
const MOCK_TRANSCRIPTS: &[(&str, &str)] = &[
    (
        "en-US",
        "[Azure Mock] Hello, this is a natural-sounding English transcription from Azure Speech-to-Text. The speaker is talking about technology and innovation.",
    ),
    (
        "en-GB",
        "[Azure Mock] Good day. This is a British English transcription. The speaker mentioned having a cup of tea and going to the countryside.",
    ),
    (
        "fr-FR",
        "[Azure Mock] Bonjour, ceci est une transcription réaliste en français provenant d'Azure Speech-to-Text. La personne parle de ses vacances à Paris et de la cuisine française.",
    ),
    (
        "es-ES",
        "[Azure Mock] Hola, esta es una transcripción realista en español de Azure Speech-to-Text. El hablante menciona una reunión importante y el clima en Madrid.",
    ),
    (
        "de-DE",
        "[Azure Mock] Guten Tag, dies ist eine realistische Transkription auf Deutsch von Azure Speech-to-Text. Der Sprecher spricht über ein neues Projekt und das Wetter in Berlin.",
    ),
    (
        "it-IT",
        "[Azure Mock] Ciao, questa è una trascrizione realistica in italiano da Azure Speech-to-Text. Il parlante discute di cibo, vino e viaggi in Toscana.",
    ),
    (
        "pt-BR",
        "[Azure Mock] Olá, esta é uma transcrição realista em português do Brasil do Azure Speech-to-Text. A pessoa está falando sobre carnaval e futebol.",
    ),
    (
        "ja-JP",
        "[Azure Mock] こんにちは、これはAzure Speech-to-Textによる自然な日本語の文字起こしです。話者は東京の天気と新しいプロジェクトについて話しています。",
    ),
    (
        "zh-CN",
        "[Azure Mock] 你好，这是来自 Azure Speech-to-Text 的逼真中文转录。说话者在讨论北京的天气和人工智能的未来。",
    ),
];

/// Deterministic transcriber used when no usable credential is configured.
///
/// Total: every locale produces a transcript, unknown ones fall back to
/// en-US. The artificial delay keeps caller-side timing close to a real
/// provider round trip.
pub struct MockTranscriber {
    delay: Duration,
}

impl MockTranscriber {
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn transcribe(&self, locale: &str) -> String {
        tokio::time::sleep(self.delay).await;

        let text = lookup(locale).unwrap_or_else(|| {
            lookup(DEFAULT_LOCALE).expect("mock table always has the default locale")
        });
        tracing::debug!(locale, "returning mock transcription");
        text.to_string()
    }
}

impl Default for MockTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

fn lookup(locale: &str) -> Option<&'static str> {
    MOCK_TRANSCRIPTS
        .iter()
        .find(|(key, _)| *key == locale)
        .map(|(_, text)| *text)
}
