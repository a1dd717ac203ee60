use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Liveness callback; answers regardless of provider state.
pub async fn callback() -> impl IntoResponse {
    Json(json!({ "status": "OK" }))
}
