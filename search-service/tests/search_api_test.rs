//! Router-level tests for the search endpoints, driven with a mock provider.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, router_with, search_request, source};
use search_service::services::build_prompt;
use search_service::services::providers::mock::MockGroundedProvider;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

#[tokio::test]
async fn search_news_returns_text_and_sources() {
    let provider = Arc::new(MockGroundedProvider::respond_with(
        Some("- News A (url1)\n- News B (url2)"),
        vec![source("uri1", "title1"), source("uri2", "title2")],
    ));
    let app = router_with(provider.clone());

    let response = app
        .oneshot(search_request(r#"{"keyword": "generative AI"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "response": "- News A (url1)\n- News B (url2)",
            "source": [
                { "uri": "uri1", "title": "title1" },
                { "uri": "uri2", "title": "title2" }
            ]
        })
    );
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn search_news_without_grounding_returns_empty_source_list() {
    let app = router_with(Arc::new(MockGroundedProvider::respond_with(
        Some("no citations here"),
        Vec::new(),
    )));

    let response = app
        .oneshot(search_request(r#"{"keyword": "rust"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "response": "no citations here", "source": [] })
    );
}

#[tokio::test]
async fn search_news_without_text_returns_empty_string() {
    let app = router_with(Arc::new(MockGroundedProvider::respond_with(None, Vec::new())));

    let response = app
        .oneshot(search_request(r#"{"keyword": "rust"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["response"], "");
    assert_eq!(body["source"], json!([]));
}

#[tokio::test]
async fn search_news_accepts_empty_keyword() {
    let app = router_with(Arc::new(MockGroundedProvider::echo()));

    let response = app
        .oneshot(search_request(r#"{"keyword": ""}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["response"], build_prompt(""));
}

#[tokio::test]
async fn provider_failure_returns_500_with_detail() {
    let app = router_with(Arc::new(MockGroundedProvider::failing(
        "429 RESOURCE_EXHAUSTED: quota exceeded",
    )));

    let response = app
        .oneshot(search_request(r#"{"keyword": "rust"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    let detail = body["detail"].as_str().expect("detail should be a string");
    assert!(detail.contains("429 RESOURCE_EXHAUSTED: quota exceeded"));
}

#[tokio::test]
async fn malformed_bodies_are_rejected_with_422() {
    let provider = Arc::new(MockGroundedProvider::echo());

    for body in [r#"{"keyword": 7}"#, r#"{}"#, "not json", r#"{"keyword": null}"#] {
        let response = router_with(provider.clone())
            .oneshot(search_request(body))
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "body {body:?} should be rejected"
        );
        let json = body_json(response).await;
        assert!(json["detail"].is_string());
    }

    // Rejected before reaching the provider.
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn missing_content_type_is_rejected_with_422() {
    let app = router_with(Arc::new(MockGroundedProvider::echo()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/search-news")
                .body(Body::from(r#"{"keyword": "rust"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn concurrent_searches_do_not_share_sources() {
    let provider = Arc::new(MockGroundedProvider::echo().with_delay(Duration::from_millis(50)));
    let keywords = ["alpha", "beta", "gamma", "delta"];

    let handles: Vec<_> = keywords
        .iter()
        .map(|keyword| {
            let app = router_with(provider.clone());
            let body = json!({ "keyword": keyword }).to_string();
            tokio::spawn(async move {
                let response = app.oneshot(search_request(&body)).await.unwrap();
                body_json(response).await
            })
        })
        .collect();

    for (keyword, handle) in keywords.iter().zip(handles) {
        let body = handle.await.unwrap();
        let sources = body["source"].as_array().unwrap();

        assert_eq!(sources.len(), 1, "exactly one source for {keyword}");
        assert_eq!(sources[0]["title"], build_prompt(keyword));
    }
    assert_eq!(provider.calls(), keywords.len());
}

#[tokio::test]
async fn callback_returns_ok_status() {
    let app = router_with(Arc::new(MockGroundedProvider::failing("provider down")));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/callback")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "OK" }));
}

#[tokio::test]
async fn get_on_search_news_is_not_allowed() {
    let app = router_with(Arc::new(MockGroundedProvider::echo()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/search-news")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn unknown_route_returns_404_json() {
    let app = router_with(Arc::new(MockGroundedProvider::echo()));

    let response = app
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No route for /nope");
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let app = router_with(Arc::new(MockGroundedProvider::echo()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/callback")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
}
