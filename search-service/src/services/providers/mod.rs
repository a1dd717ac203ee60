//! Grounded generation provider abstraction.
//!
//! The search service talks to a `GroundedProvider`: one call that sends a
//! prompt with web-search grounding enabled and returns the answer text plus
//! the web citations it was grounded on. Gemini is the production backend;
//! the mock backs tests.

pub mod gemini;
pub mod mock;

use crate::models::SearchSource;
use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited(_) => "rate_limited",
            ProviderError::InvalidResponse(_) => "invalid_response",
            ProviderError::NetworkError(_) => "network_error",
        }
    }
}

/// Result of a grounded generation call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroundedResponse {
    /// Answer text. `None` when the provider returned no text part.
    pub text: Option<String>,

    /// Web citations in provider order.
    pub sources: Vec<SearchSource>,

    /// Provider finish reason, if reported.
    pub finish_reason: Option<String>,

    pub input_tokens: i32,
    pub output_tokens: i32,
}

/// A generation backend with web-search grounding.
#[async_trait]
pub trait GroundedProvider: Send + Sync {
    /// Generate a response for `prompt` with search grounding as the only tool.
    async fn generate_grounded(&self, prompt: &str) -> Result<GroundedResponse, ProviderError>;

    /// Provider label used in logs and metrics.
    fn name(&self) -> &'static str;
}
