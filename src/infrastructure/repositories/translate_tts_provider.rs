use super::synthesis_provider::{ProviderError, SynthesisProvider};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header;
use std::time::{Duration, Instant};

/// Public translate TTS endpoint (unauthenticated)
pub const DEFAULT_ENDPOINT: &str = "https://translate.google.com/translate_tts";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const REFERER: &str = "https://translate.google.com/";

/// Synthesis provider backed by the translate TTS endpoint.
///
/// The endpoint is undocumented; swapping in an official, authenticated
/// service means another `SynthesisProvider` implementation with its own
/// credentials, nothing else.
pub struct TranslateTtsProvider {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl TranslateTtsProvider {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    fn classify(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.timeout)
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl SynthesisProvider for TranslateTtsProvider {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Bytes, ProviderError> {
        let start_time = Instant::now();

        tracing::debug!(
            language = language,
            text_length = text.len(),
            "Calling translate TTS endpoint"
        );

        let response = self
            .client
            .get(&self.endpoint)
            .header(header::REFERER, REFERER)
            .query(&[
                ("ie", "UTF-8"),
                ("q", text),
                ("tl", language),
                ("client", "tw-ob"),
            ])
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                language = language,
                "Translate TTS request rejected"
            );
            return Err(ProviderError::Status(status.as_u16()));
        }

        let audio = response.bytes().await.map_err(|e| self.classify(e))?;

        tracing::debug!(
            provider = "translate_tts",
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio.len(),
            "Translate TTS response received"
        );

        Ok(audio)
    }
}
