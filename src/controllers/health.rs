use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use crate::infrastructure::repositories::AudioCacheRepository;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(cache_repo): State<Arc<AudioCacheRepository>>) -> impl IntoResponse {
    if cache_repo.check_ready().await {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "cache": "available",
                "checked_at": Utc::now()
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "cache": "unavailable",
                "checked_at": Utc::now()
            })),
        )
    }
}
