use super::validator::AudioRejection;
use crate::error::AppError;
use crate::infrastructure::repositories::ProviderError;

/// Failures of the voice message service.
///
/// `Clone` so one failed synthesis can be handed to every request that was
/// waiting on the same key.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TtsServiceError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("synthesis failed: {0}")]
    SynthesisFailed(#[source] ProviderError),
    #[error("invalid audio: {0}")]
    InvalidAudio(#[source] AudioRejection),
    #[error("cache read failed: {0}")]
    CacheReadFailed(String),
    #[error("staging failed: {0}")]
    StagingFailed(String),
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::InvalidInput(msg) => AppError::BadRequest(msg),
            TtsServiceError::SynthesisFailed(ProviderError::Timeout(after)) => {
                AppError::GatewayTimeout(format!("no audio after {:?}", after))
            }
            TtsServiceError::SynthesisFailed(e) => AppError::BadGateway(e.to_string()),
            TtsServiceError::InvalidAudio(rejection) => AppError::BadGateway(rejection.to_string()),
            TtsServiceError::CacheReadFailed(msg) | TtsServiceError::StagingFailed(msg) => {
                AppError::Internal(msg)
            }
        }
    }
}
