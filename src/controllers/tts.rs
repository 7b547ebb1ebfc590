use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::tts::{TtsService, TtsServiceApi, VoiceMessage},
    error::{AppError, AppResult},
};

const MAX_TEXT_CHARS: usize = 10_000;

/// Request for POST /api/tts/voice
#[derive(Debug, Serialize, Deserialize)]
pub struct VoiceMessageRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

pub struct TtsController {
    tts_service: Arc<TtsService>,
}

impl TtsController {
    pub fn new(tts_service: Arc<TtsService>) -> Self {
        Self { tts_service }
    }

    /// POST /api/tts/voice - Convert text to speech
    pub async fn voice_message(
        State(controller): State<Arc<TtsController>>,
        Json(request): Json<VoiceMessageRequest>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        if request.text.chars().count() > MAX_TEXT_CHARS {
            return Err(AppError::PayloadTooLarge(format!(
                "Text must be {} characters or less",
                MAX_TEXT_CHARS
            )));
        }

        let message = controller
            .tts_service
            .get_voice_message(&request.text, request.language.as_deref())
            .await?;

        Ok(audio_response(message))
    }

    /// GET /api/tts/words/:word - Pronounce a single word
    pub async fn word_pronunciation(
        State(controller): State<Arc<TtsController>>,
        Path(word): Path<String>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let message = controller.tts_service.get_word_pronunciation(&word).await?;

        Ok(audio_response(message))
    }
}

fn audio_response(message: VoiceMessage) -> (StatusCode, HeaderMap, Body) {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/mpeg"));
    if let Ok(value) = HeaderValue::from_str(message.cache_key.as_str()) {
        headers.insert("X-Cache-Key", value);
    }
    if let Ok(value) = HeaderValue::from_str(&message.language) {
        headers.insert("X-Language", value);
    }

    (StatusCode::OK, headers, Body::from(message.audio))
}
