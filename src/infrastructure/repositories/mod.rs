pub mod audio_cache_repository;
pub mod synthesis_provider;
pub mod translate_tts_provider;

pub use audio_cache_repository::{
    AudioCacheRepository, CacheError, StoreOutcome, AUDIO_EXTENSION, EPHEMERAL_PREFIX,
};
pub use synthesis_provider::{ProviderError, SynthesisProvider};
pub use translate_tts_provider::TranslateTtsProvider;
