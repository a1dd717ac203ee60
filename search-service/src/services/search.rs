//! Keyword news search: prompt construction and response shaping.

use super::metrics;
use super::providers::GroundedProvider;
use crate::models::SearchNewsResponse;
use service_core::error::AppError;
use std::sync::Arc;
use std::time::Instant;

/// Ask for last month's news on `keyword`, as a Markdown list of titles and URLs.
pub fn build_prompt(keyword: &str) -> String {
    format!(
        "請針對關鍵字『{keyword}』，搜尋並總結其最近一個月內最相關的新聞與事件。\
         請只回傳新聞標題以及新聞網址，並將標題和網址整理成一個Markdown格式的列表。"
    )
}

/// Turns a keyword into a grounded news summary. Holds only a read-only
/// provider handle, so clones are cheap and calls share no state.
#[derive(Clone)]
pub struct SearchService {
    provider: Arc<dyn GroundedProvider>,
}

impl SearchService {
    pub fn new(provider: Arc<dyn GroundedProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// One provider call per invocation, no retry. Any provider failure becomes
    /// `AppError::UpstreamError` carrying the provider's message.
    #[tracing::instrument(skip(self), fields(provider = self.provider.name()))]
    pub async fn search_news(&self, keyword: &str) -> Result<SearchNewsResponse, AppError> {
        let prompt = build_prompt(keyword);
        let provider = self.provider.name();
        let start = Instant::now();

        let result = self.provider.generate_grounded(&prompt).await;
        let elapsed = start.elapsed();

        match result {
            Ok(grounded) => {
                metrics::record_provider_call(provider, "success", elapsed);
                metrics::record_sources(provider, grounded.sources.len());

                tracing::info!(
                    sources = grounded.sources.len(),
                    input_tokens = grounded.input_tokens,
                    output_tokens = grounded.output_tokens,
                    finish_reason = grounded.finish_reason.as_deref().unwrap_or("-"),
                    latency_ms = elapsed.as_millis() as u64,
                    "Grounded search completed"
                );

                Ok(SearchNewsResponse {
                    response: grounded.text.unwrap_or_default(),
                    source: grounded.sources,
                })
            }
            Err(e) => {
                metrics::record_provider_call(provider, e.kind(), elapsed);
                tracing::warn!(error = %e, "Grounded search failed");

                Err(AppError::UpstreamError(format!(
                    "{} provider error: {}",
                    provider, e
                )))
            }
        }
    }
}
