use super::error::TtsServiceError;
use super::key::CacheKey;
use super::language::SynthesisRequest;
use super::validator::{self, AudioFormat};
use crate::infrastructure::repositories::{
    AudioCacheRepository, ProviderError, StoreOutcome, SynthesisProvider,
};
use async_trait::async_trait;
use bytes::Bytes;
use moka::future::Cache;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct VoiceMessage {
    pub audio: Bytes,
    pub cache_key: CacheKey,
    pub language: String,
}

pub struct TtsService {
    cache_repo: Arc<AudioCacheRepository>,
    provider: Arc<dyn SynthesisProvider>,
    default_language: String,
    synthesis_timeout: Duration,
    hot_cache: Cache<CacheKey, Bytes>,
}

impl TtsService {
    pub fn new(
        cache_repo: Arc<AudioCacheRepository>,
        provider: Arc<dyn SynthesisProvider>,
        default_language: String,
        synthesis_timeout: Duration,
        memory_cache_entries: u64,
    ) -> Self {
        // Concurrent misses for one key share a single resolution through
        // try_get_with; resolved audio then stays hot for a while.
        let hot_cache = Cache::builder()
            .max_capacity(memory_cache_entries)
            .time_to_idle(Duration::from_secs(30 * 60)) // 30 minutes, refreshes on access
            .build();

        Self {
            cache_repo,
            provider,
            default_language,
            synthesis_timeout,
            hot_cache,
        }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Turn text into spoken audio
    ///
    /// This operation:
    /// - Trims the text and rejects it if nothing is left
    /// - Falls back to the default language when none is given
    /// - Serves the cached clip when one exists
    /// - Otherwise calls the provider, validates, and caches the result
    ///
    /// A failed cache write does not fail the call.
    async fn get_voice_message(
        &self,
        text: &str,
        language: Option<&str>,
    ) -> Result<VoiceMessage, TtsServiceError>;

    /// Pronunciation of a single word in the default language
    async fn get_word_pronunciation(&self, word: &str) -> Result<VoiceMessage, TtsServiceError>;

    /// Write audio to an ephemeral file for an outbound delivery channel
    async fn stage_for_delivery(
        &self,
        audio: Bytes,
        suggested_name: &str,
    ) -> Result<PathBuf, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn get_voice_message(
        &self,
        text: &str,
        language: Option<&str>,
    ) -> Result<VoiceMessage, TtsServiceError> {
        let request = SynthesisRequest::normalize(text, language, &self.default_language)?;
        let cache_key = CacheKey::derive(&request.text, &request.language);

        let audio = self
            .hot_cache
            .try_get_with(cache_key.clone(), self.resolve(&request, &cache_key))
            .await
            .map_err(|e| (*e).clone())?;

        Ok(VoiceMessage {
            audio,
            cache_key,
            language: request.language,
        })
    }

    async fn get_word_pronunciation(&self, word: &str) -> Result<VoiceMessage, TtsServiceError> {
        self.get_voice_message(word, Some(self.default_language.as_str()))
            .await
    }

    async fn stage_for_delivery(
        &self,
        audio: Bytes,
        suggested_name: &str,
    ) -> Result<PathBuf, TtsServiceError> {
        self.cache_repo
            .materialize_temp(audio, suggested_name)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to create temporary voice file");
                TtsServiceError::StagingFailed(e.to_string())
            })
    }
}

impl TtsService {
    /// Disk cache first, provider on a miss
    async fn resolve(
        &self,
        request: &SynthesisRequest,
        cache_key: &CacheKey,
    ) -> Result<Bytes, TtsServiceError> {
        match self.cache_repo.lookup(cache_key).await {
            Ok(Some(audio)) => {
                tracing::debug!(
                    cache_key = %cache_key,
                    audio_size = audio.len(),
                    "TTS cache hit"
                );
                return Ok(audio);
            }
            Ok(None) => {
                tracing::debug!(cache_key = %cache_key, "TTS cache miss");
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    cache_key = %cache_key,
                    "Failed to read TTS cache entry"
                );
                return Err(TtsServiceError::CacheReadFailed(e.to_string()));
            }
        }

        let audio = self.synthesize(request).await?;

        match validator::validate(&audio) {
            Ok(AudioFormat::Unrecognized) => {
                tracing::debug!(
                    audio_size = audio.len(),
                    "Accepting audio without a recognized signature"
                );
            }
            Ok(_) => {}
            Err(rejection) => {
                tracing::warn!(
                    reason = %rejection,
                    language = %request.language,
                    audio_size = audio.len(),
                    "Provider returned invalid audio"
                );
                return Err(TtsServiceError::InvalidAudio(rejection));
            }
        }

        match self.cache_repo.store(cache_key, audio.clone()).await {
            Ok(StoreOutcome::Created) => {
                tracing::info!(
                    cache_key = %cache_key,
                    audio_size = audio.len(),
                    "TTS audio cached"
                );
            }
            Ok(StoreOutcome::AlreadyPresent) => {
                tracing::debug!(cache_key = %cache_key, "TTS audio already cached");
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    cache_key = %cache_key,
                    "Failed to cache TTS audio"
                );
            }
        }

        Ok(audio)
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Bytes, TtsServiceError> {
        let start_time = Instant::now();

        let outcome = tokio::time::timeout(
            self.synthesis_timeout,
            self.provider.synthesize(&request.text, &request.language),
        )
        .await
        .unwrap_or_else(|_| Err(ProviderError::Timeout(self.synthesis_timeout)));

        match outcome {
            Ok(audio) => {
                tracing::info!(
                    language = %request.language,
                    characters_count = request.text.chars().count(),
                    latency_ms = start_time.elapsed().as_millis(),
                    audio_size_bytes = audio.len(),
                    "TTS synthesis completed"
                );
                Ok(audio)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    language = %request.language,
                    text_length = request.text.len(),
                    "Failed to generate TTS audio"
                );
                Err(TtsServiceError::SynthesisFailed(e))
            }
        }
    }
}
