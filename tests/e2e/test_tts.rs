use crate::e2e::helpers;

use helpers::{fake_provider::clip_for, TestContext};
use hyper::StatusCode;
use lingo_voice::domain::tts::CacheKey;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_synthesized_audio(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/tts/voice", &json!({ "text": "hello world", "language": "en" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mpeg")
        .assert_header("x-language", "en")
        .assert_header_exists("x-request-id");

    let key = CacheKey::derive("hello world", "en");
    response.assert_header("x-cache-key", key.as_str());
    assert_eq!(response.body_bytes, clip_for("hello world", "en"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_repeat_requests_from_cache(ctx: &TestContext) {
    let body = json!({ "text": "bonjour", "language": "fr" });

    let first = ctx.client.post("/api/tts/voice", &body).await.unwrap();
    let second = ctx.client.post("/api/tts/voice", &body).await.unwrap();

    first.assert_status(StatusCode::OK);
    second.assert_status(StatusCode::OK);
    assert_eq!(first.body_bytes, second.body_bytes);
    assert_eq!(ctx.provider.calls(), 1);

    let entry = ctx.cache_repo.entry_path(&CacheKey::derive("bonjour", "fr"));
    assert_eq!(std::fs::read(entry).unwrap(), first.body_bytes);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_treat_padded_text_as_the_same_entry(ctx: &TestContext) {
    ctx.client
        .post("/api/tts/voice", &json!({ "text": "hola", "language": "es" }))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let response = ctx
        .client
        .post("/api/tts/voice", &json!({ "text": "  hola \n", "language": " es " }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("x-language", "es");
    assert_eq!(ctx.provider.calls(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fall_back_to_default_language(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/tts/voice", &json!({ "text": "good morning" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("x-language", "en");
    assert_eq!(response.body_bytes, clip_for("good morning", "en"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_blank_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/tts/voice", &json!({ "text": "   " }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Text cannot be empty");
    assert_eq!(ctx.provider.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_oversized_text(ctx: &TestContext) {
    let text = "a".repeat(10_001);

    let response = ctx
        .client
        .post("/api/tts/voice", &json!({ "text": text }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::PAYLOAD_TOO_LARGE)
        .assert_error_message("10000 characters or less");
    assert_eq!(ctx.provider.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_body_without_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post_raw("/api/tts/voice", "application/json", r#"{"language":"en"}"#)
        .await
        .unwrap();

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_map_provider_failure_to_bad_gateway(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/tts/voice", &json!({ "text": "unavailable today" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("status 503");

    let entry = ctx
        .cache_repo
        .entry_path(&CacheKey::derive("unavailable today", "en"));
    assert!(!entry.exists());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_remember_failures(ctx: &TestContext) {
    let body = json!({ "text": "unavailable again" });

    ctx.client
        .post("/api/tts/voice", &body)
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_GATEWAY);
    ctx.client
        .post("/api/tts/voice", &body)
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_GATEWAY);

    assert_eq!(ctx.provider.calls(), 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_undersized_audio(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/tts/voice", &json!({ "text": "tiny clip" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("too small");

    let entry = ctx.cache_repo.entry_path(&CacheKey::derive("tiny clip", "en"));
    assert!(!entry.exists());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_pronounce_a_word_in_default_language(ctx: &TestContext) {
    let response = ctx.client.get("/api/tts/words/apple").await.unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mpeg")
        .assert_header("x-language", "en");
    assert_eq!(response.body_bytes, clip_for("apple", "en"));

    // Same entry as the equivalent voice request
    let voice = ctx
        .client
        .post("/api/tts/voice", &json!({ "text": "apple", "language": "en" }))
        .await
        .unwrap();
    assert_eq!(voice.header("x-cache-key"), response.header("x-cache-key"));
    assert_eq!(ctx.provider.calls(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_synthesize_concurrent_identical_requests_once(ctx: &TestContext) {
    let mut futures = Vec::new();
    for _ in 0..8 {
        let client = ctx.client.clone();
        futures.push(async move {
            client
                .post("/api/tts/voice", &json!({ "text": "same words" }))
                .await
        });
    }

    let results = futures::future::join_all(futures).await;

    for result in results {
        result.unwrap().assert_status(StatusCode::OK);
    }
    assert_eq!(ctx.provider.calls(), 1);
}
