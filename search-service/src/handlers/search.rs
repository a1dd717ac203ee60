use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::utils::JsonBody;

use crate::models::{SearchNewsRequest, SearchNewsResponse};
use crate::startup::AppState;

/// Search last month's news for a keyword via grounded generation.
#[tracing::instrument(skip(state, request), fields(keyword_len = request.keyword.len()))]
pub async fn search_news(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SearchNewsRequest>,
) -> Result<Json<SearchNewsResponse>, AppError> {
    let response = state.search.search_news(&request.keyword).await?;
    Ok(Json(response))
}
