//! End-to-end route tests against stub ports.

mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use common::{StubBackend, StubRegistry, router, test_settings};
use voxd_cache::MemoryCacheStore;
use voxd_core::ports::CacheStore;

const VOICE: &str = "en_US-test-voice";

fn synthesize_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/synthesize")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn header_str<'a>(response: &'a axum::response::Response, name: &str) -> &'a str {
    response
        .headers()
        .get(name)
        .unwrap_or_else(|| panic!("missing header {name}"))
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn health_reports_healthy() {
    let backend = Arc::new(StubBackend::new(22_050, vec![1; 8]));
    let app = router(
        Arc::new(StubRegistry::single(VOICE, backend)),
        None,
        test_settings(VOICE),
    );

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn synthesize_returns_raw_pcm_with_metadata_headers() {
    let backend = Arc::new(StubBackend::new(22_050, vec![100; 441]));
    let app = router(
        Arc::new(StubRegistry::single(VOICE, backend)),
        None,
        test_settings(VOICE),
    );

    let response = app
        .oneshot(synthesize_request(r#"{"text":"hello world"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_str(&response, "content-type"), "audio/x-raw");
    assert_eq!(header_str(&response, "x-model"), VOICE);
    assert_eq!(header_str(&response, "x-sample-rate"), "22050");
    assert_eq!(header_str(&response, "x-cache"), "BYPASS");
    assert_eq!(header_str(&response, "x-resampling"), "NONE");

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body.len(), 441 * 2);
}

#[tokio::test]
async fn repeated_request_is_served_from_the_cache() {
    let backend = Arc::new(StubBackend::new(22_050, vec![7; 64]));
    let cache = Arc::new(MemoryCacheStore::new()) as Arc<dyn CacheStore>;
    let app = router(
        Arc::new(StubRegistry::single(VOICE, Arc::clone(&backend))),
        Some(cache),
        test_settings(VOICE),
    );

    let first = app
        .clone()
        .oneshot(synthesize_request(r#"{"text":"cache me"}"#))
        .await
        .unwrap();
    assert_eq!(header_str(&first, "x-cache"), "MISS");

    let second = app
        .oneshot(synthesize_request(r#"{"text":"cache me"}"#))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(header_str(&second, "x-cache"), "HIT");
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);

    let body = second.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body.len(), 64 * 2);
}

#[tokio::test]
async fn requested_sample_rate_triggers_resampling() {
    let backend = Arc::new(StubBackend::new(22_050, vec![0; 2205]));
    let app = router(
        Arc::new(StubRegistry::single(VOICE, backend)),
        None,
        test_settings(VOICE),
    );

    let response = app
        .oneshot(synthesize_request(r#"{"text":"hello","sampleRate":16000}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_str(&response, "x-sample-rate"), "16000");
    assert_eq!(header_str(&response, "x-resampling"), "APPLIED");

    // 2205 samples at 22050 Hz is 100 ms; 100 ms at 16 kHz is 1600 samples.
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let samples = body.len() / 2;
    assert!((1599..=1601).contains(&samples), "got {samples} samples");
}

#[tokio::test]
async fn empty_text_is_a_bad_request_with_detail() {
    let backend = Arc::new(StubBackend::new(22_050, vec![1; 8]));
    let app = router(
        Arc::new(StubRegistry::single(VOICE, backend)),
        None,
        test_settings(VOICE),
    );

    let response = app
        .oneshot(synthesize_request(r#"{"text":""}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["detail"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn unknown_model_is_not_found() {
    let backend = Arc::new(StubBackend::new(22_050, vec![1; 8]));
    let app = router(
        Arc::new(StubRegistry::single(VOICE, backend)),
        None,
        test_settings(VOICE),
    );

    let response = app
        .oneshot(synthesize_request(
            r#"{"text":"hello","model":"no-such-voice"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["detail"].as_str().unwrap().contains("no-such-voice"));
}

#[tokio::test]
async fn engine_failure_is_an_internal_error() {
    let mut backend = StubBackend::new(22_050, vec![1; 8]);
    backend.fail = true;
    let app = router(
        Arc::new(StubRegistry::single(VOICE, Arc::new(backend))),
        None,
        test_settings(VOICE),
    );

    let response = app
        .oneshot(synthesize_request(r#"{"text":"hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["detail"].as_str().unwrap().contains("inference aborted"));
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let backend = Arc::new(StubBackend::new(22_050, vec![1; 8]));
    let app = router(
        Arc::new(StubRegistry::single(VOICE, backend)),
        None,
        test_settings(VOICE),
    );

    let response = app
        .oneshot(synthesize_request("{not json"))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
