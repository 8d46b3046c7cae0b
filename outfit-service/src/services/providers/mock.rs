//! Mock provider implementation for testing.

use super::{GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::time::Duration;

/// Mock text provider returning a canned reply, optionally after a delay.
pub struct MockTextProvider {
    reply: Option<String>,
    delay: Option<Duration>,
}

impl MockTextProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            delay: None,
        }
    }

    /// Provider that answers without any text block.
    pub fn empty() -> Self {
        Self {
            reply: None,
            delay: None,
        }
    }

    /// Delay every call; lets tests drive the deadline path.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        Ok(ProviderResponse {
            text: self.reply.clone(),
            input_tokens: prompt.len() as i32 / 4,
            output_tokens: self
                .reply
                .as_ref()
                .map(|reply| reply.len() as i32 / 4)
                .unwrap_or(0),
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
