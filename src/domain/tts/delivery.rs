use super::error::TtsServiceError;
use super::service::TtsServiceApi;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Outbound channel that accepts a voice file from disk (a chat bot, a mailer).
#[async_trait]
pub trait VoiceSink: Send + Sync {
    async fn send_voice(&self, path: &Path) -> Result<(), String>;
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error(transparent)]
    Tts(#[from] TtsServiceError),
    #[error("delivery channel error: {0}")]
    Channel(String),
}

/// Sends word pronunciations through a file-based delivery channel.
pub struct VoiceDelivery {
    tts_service: Arc<dyn TtsServiceApi>,
}

impl VoiceDelivery {
    pub fn new(tts_service: Arc<dyn TtsServiceApi>) -> Self {
        Self { tts_service }
    }

    /// Synthesize `word`, stage it as an ephemeral file, and hand it to `sink`.
    ///
    /// The staged file is removed once the sink returns, whatever the outcome.
    /// Files that survive a crash here are left to the janitor.
    pub async fn send_word_voice(&self, word: &str, sink: &dyn VoiceSink) -> Result<(), DeliveryError> {
        let message = self.tts_service.get_word_pronunciation(word).await?;
        let path = self.tts_service.stage_for_delivery(message.audio, word).await?;

        let sent = sink.send_voice(&path).await;

        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!(
                file = %path.display(),
                error = %e,
                "Failed to clean up temp voice file"
            );
        }

        sent.map_err(|e| {
            tracing::error!(error = %e, word = word, "Failed to deliver voice message");
            DeliveryError::Channel(e)
        })
    }
}
