//! Anthropic provider implementation.
//!
//! Implements text generation against the Anthropic Messages API.

use super::{GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Messages API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Upstream error bodies are truncated to this many characters when echoed.
const ERROR_SNIPPET_LEN: usize = 200;

/// Anthropic provider configuration.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
}

/// Anthropic text provider.
pub struct AnthropicTextProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicTextProvider {
    pub fn new(config: AnthropicConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn api_url(&self) -> String {
        format!("{}/v1/messages", self.config.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl TextProvider for AnthropicTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        let request = MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to Anthropic API"
        );

        let response = self
            .client
            .post(self.api_url())
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();

            return Err(ProviderError::Api {
                status,
                message: truncate(&error_text, ERROR_SNIPPET_LEN),
            });
        }

        let api_response: MessagesResponse = response.json().await.map_err(|e| {
            ProviderError::Network(format!("Failed to parse upstream response: {}", e))
        })?;

        // The reply lives in the first text-typed content block.
        let text = api_response.content.first().and_then(|block| match block {
            ContentBlock::Text { text } => Some(text.clone()),
            ContentBlock::Other => None,
        });

        let usage = api_response.usage.unwrap_or_default();

        tracing::debug!(
            input_tokens = usage.input_tokens.unwrap_or(0),
            output_tokens = usage.output_tokens.unwrap_or(0),
            "Anthropic API call complete"
        );

        Ok(ProviderResponse {
            text,
            input_tokens: usage.input_tokens.unwrap_or(0),
            output_tokens: usage.output_tokens.unwrap_or(0),
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "Anthropic API key not configured".to_string(),
            ));
        }

        Ok(())
    }
}

fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

// ============================================================================
// Anthropic API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize, Default)]
struct Usage {
    input_tokens: Option<i32>,
    output_tokens: Option<i32>,
}
