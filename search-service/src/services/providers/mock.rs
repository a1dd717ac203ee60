//! Mock provider implementation for testing.

use super::{GroundedProvider, GroundedResponse, ProviderError};
use crate::models::SearchSource;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

enum Behavior {
    Respond(GroundedResponse),
    Fail(String),
    Echo,
}

/// Scripted provider: replies with a fixed response, a fixed error, or an
/// echo of the prompt.
pub struct MockGroundedProvider {
    behavior: Behavior,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockGroundedProvider {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn respond_with(text: Option<&str>, sources: Vec<SearchSource>) -> Self {
        Self::with_behavior(Behavior::Respond(GroundedResponse {
            text: text.map(str::to_string),
            sources,
            finish_reason: Some("STOP".to_string()),
            ..GroundedResponse::default()
        }))
    }

    /// Every call fails with `ProviderError::ApiError(message)`.
    pub fn failing(message: &str) -> Self {
        Self::with_behavior(Behavior::Fail(message.to_string()))
    }

    /// Returns the prompt as text and a single source whose title is the prompt.
    pub fn echo() -> Self {
        Self::with_behavior(Behavior::Echo)
    }

    /// Sleep before answering, so concurrent calls overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GroundedProvider for MockGroundedProvider {
    async fn generate_grounded(&self, prompt: &str) -> Result<GroundedResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behavior {
            Behavior::Respond(response) => Ok(response.clone()),
            Behavior::Fail(message) => Err(ProviderError::ApiError(message.clone())),
            Behavior::Echo => Ok(GroundedResponse {
                text: Some(prompt.to_string()),
                sources: vec![SearchSource {
                    uri: format!("mock://{}", prompt.len()),
                    title: prompt.to_string(),
                }],
                finish_reason: Some("STOP".to_string()),
                input_tokens: prompt.len() as i32 / 4,
                output_tokens: 10,
            }),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
