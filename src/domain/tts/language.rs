use super::error::TtsServiceError;

/// Language used when a caller does not name one
pub const DEFAULT_LANGUAGE: &str = "en";

/// A synthesis request after normalization at the service boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub text: String,
    pub language: String,
}

impl SynthesisRequest {
    /// Trim the text and fill in the default language.
    ///
    /// Empty text (after trimming) is rejected before any cache or provider
    /// access. A blank language counts as unspecified.
    pub fn normalize(
        text: &str,
        language: Option<&str>,
        default_language: &str,
    ) -> Result<Self, TtsServiceError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TtsServiceError::InvalidInput(
                "Text cannot be empty".to_string(),
            ));
        }

        let language = match language.map(str::trim) {
            Some(code) if !code.is_empty() => code.to_string(),
            _ => default_language.to_string(),
        };

        Ok(Self {
            text: text.to_string(),
            language,
        })
    }
}
