pub mod delivery;
pub mod error;
pub mod key;
pub mod language;
pub mod service;
pub mod validator;


pub use delivery::{DeliveryError, VoiceDelivery, VoiceSink};
pub use error::TtsServiceError;
pub use key::CacheKey;
pub use language::{SynthesisRequest, DEFAULT_LANGUAGE};
pub use service::{TtsService, TtsServiceApi, VoiceMessage};
