use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Wardrobe items listed in the prompt are capped to bound token usage.
const DEFAULT_PROMPT_ITEM_CAP: usize = 8;

/// Hard deadline for the upstream generation call, in seconds.
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 25;

#[derive(Debug, Clone, Deserialize)]
pub struct OutfitConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub anthropic: AnthropicSettings,
    pub generation: GenerationSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicSettings {
    /// Upstream credential. Absence is a request-time configuration error on
    /// the generation endpoint, never a startup failure.
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
    pub prompt_item_cap: usize,
    pub upstream_timeout_secs: u64,
}

impl OutfitConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(OutfitConfig {
            common,
            anthropic: AnthropicSettings {
                api_key: env::var("ANTHROPIC_API_KEY")
                    .ok()
                    .filter(|key| !key.is_empty()),
                model: get_env("ANTHROPIC_MODEL", "claude-3-haiku-20240307"),
                api_base: get_env("ANTHROPIC_API_BASE", "https://api.anthropic.com"),
            },
            generation: GenerationSettings {
                max_tokens: parse_env("OUTFIT_MAX_TOKENS", 1024),
                temperature: parse_env("OUTFIT_TEMPERATURE", 0.7),
                prompt_item_cap: parse_env("OUTFIT_PROMPT_ITEM_CAP", DEFAULT_PROMPT_ITEM_CAP),
                upstream_timeout_secs: parse_env(
                    "OUTFIT_UPSTREAM_TIMEOUT_SECS",
                    DEFAULT_UPSTREAM_TIMEOUT_SECS,
                ),
            },
        })
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
