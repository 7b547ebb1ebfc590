use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("provider responded with status {0}")]
    Status(u16),
}

/// External text-to-speech capability.
/// Abstracts the network service that turns text into audio.
///
/// Implementations perform exactly one outbound attempt per call:
/// - No retries (callers may retry the whole request)
/// - Any non-2xx response is a failure
/// - The body is returned as-is; payload sanity is checked by the caller
#[async_trait]
pub trait SynthesisProvider: Send + Sync {
    /// Synthesize `text` spoken in `language` (a short code such as "en")
    ///
    /// # Errors
    /// Returns error on transport failure, timeout, or a non-success status
    async fn synthesize(&self, text: &str, language: &str) -> Result<Bytes, ProviderError>;
}
