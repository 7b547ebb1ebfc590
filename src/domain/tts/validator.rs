//! Structural sanity checks for provider payloads.
//!
//! Only the obvious failure shapes are rejected: nothing at all, or a body
//! too short to be a clip (typically an HTML error page served with a 200).
//! Anything else of plausible size is accepted even when no known signature
//! matches.

/// Smallest payload accepted as audio
pub const MIN_AUDIO_BYTES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AudioRejection {
    #[error("empty audio data")]
    EmptyAudio,
    #[error("audio data too small ({0} bytes), might be corrupted")]
    TooSmall(usize),
}

/// What the validator recognized in an accepted payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    /// Starts on an MPEG audio frame sync (11 set bits)
    MpegFrame,
    /// Starts with an ID3v2 tag
    Id3Tagged,
    Unrecognized,
}

pub fn validate(data: &[u8]) -> Result<AudioFormat, AudioRejection> {
    if data.is_empty() {
        return Err(AudioRejection::EmptyAudio);
    }

    if data.len() < MIN_AUDIO_BYTES {
        return Err(AudioRejection::TooSmall(data.len()));
    }

    Ok(detect_format(data))
}

fn detect_format(data: &[u8]) -> AudioFormat {
    match data {
        [0xFF, second, ..] if second & 0xE0 == 0xE0 => AudioFormat::MpegFrame,
        [b'I', b'D', b'3', ..] => AudioFormat::Id3Tagged,
        _ => AudioFormat::Unrecognized,
    }
}
