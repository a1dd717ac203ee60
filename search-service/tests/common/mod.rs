use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use search_service::config::{GeminiConfig, SearchConfig};
use search_service::models::SearchSource;
use search_service::services::GroundedProvider;
use search_service::{build_router, AppState};
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;

pub fn test_config() -> SearchConfig {
    SearchConfig {
        common: CoreConfig {
            port: 0, // Random port for testing
            ..CoreConfig::default()
        },
        gemini: GeminiConfig {
            api_key: Secret::new("test-api-key".to_string()),
            model: "gemini-2.5-flash".to_string(),
            api_base: "http://127.0.0.1:1".to_string(),
            request_timeout_secs: 5,
        },
    }
}

pub fn router_with(provider: Arc<dyn GroundedProvider>) -> axum::Router {
    build_router(AppState::new(test_config(), provider))
}

pub fn source(uri: &str, title: &str) -> SearchSource {
    SearchSource {
        uri: uri.to_string(),
        title: title.to_string(),
    }
}

pub fn search_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/search-news")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}
