use async_trait::async_trait;
use bytes::Bytes;
use lingo_voice::infrastructure::repositories::{ProviderError, SynthesisProvider};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Scripted provider keyed on the request text:
/// `unavailable...` answers 503, `tiny...` returns a clip below the audio
/// size floor, anything else returns an MP3-looking clip unique to the text.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    calls: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn clip_for(text: &str, language: &str) -> Vec<u8> {
    let mut audio = vec![0xFF, 0xFB, 0x90, 0x00];
    audio.extend_from_slice(format!("{language}|{text}").as_bytes());
    audio.resize(audio.len().max(256), 0);
    audio
}

#[async_trait]
impl SynthesisProvider for ScriptedProvider {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Bytes, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if text.starts_with("unavailable") {
            return Err(ProviderError::Status(503));
        }
        if text.starts_with("tiny") {
            return Ok(Bytes::from_static(&[0xFF, 0xFB, 0x90, 0x00]));
        }

        Ok(Bytes::from(clip_for(text, language)))
    }
}
