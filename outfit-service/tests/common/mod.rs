//! Test helper module for outfit-service integration tests.

#![allow(dead_code)]

use outfit_service::config::{AnthropicSettings, GenerationSettings, OutfitConfig};
use outfit_service::services::providers::TextProvider;
use outfit_service::startup::Application;
use std::sync::Arc;

pub const TEST_API_KEY: &str = "test-api-key";

/// A well-formed model reply referencing the ids from [`wardrobe`].
pub const WELL_FORMED_REPLY: &str = r#"{
    "outfit": {
        "top": {"id": "w1", "razon": "clásica para la oficina"},
        "bottom": {"id": "w2", "razon": "combina con la camisa"},
        "shoes": {"id": "w3", "razon": "formales"}
    },
    "descripcion": "Look clásico de oficina",
    "tips": ["plancha la camisa", "lleva un abrigo ligero"]
}"#;

/// Build a config bound to an ephemeral port.
///
/// Configs are constructed directly rather than loaded from process
/// environment because tests run concurrently and the environment is shared.
pub fn test_config(api_key: Option<&str>) -> OutfitConfig {
    OutfitConfig {
        common: service_core::config::Config { port: 0 },
        anthropic: AnthropicSettings {
            api_key: api_key.map(str::to_string),
            model: "claude-3-haiku-20240307".to_string(),
            api_base: "https://api.anthropic.com".to_string(),
        },
        generation: GenerationSettings {
            max_tokens: 1024,
            temperature: 0.7,
            prompt_item_cap: 8,
            upstream_timeout_secs: 25,
        },
    }
}

/// A three-item wardrobe covering each slot type.
pub fn wardrobe() -> serde_json::Value {
    serde_json::json!([
        {"id": "w1", "tipo": "top", "nombre": "Camisa blanca", "color": "blanco", "marca": "Zara"},
        {"id": "w2", "tipo": "bottom", "nombre": "Pantalón", "color": "azul"},
        {"id": "w3", "tipo": "shoes", "nombre": "Zapatos", "color": "negro"}
    ])
}

/// Test application wrapper for integration tests.
pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    /// Spawn the application on a random port with the given provider.
    pub async fn spawn(config: OutfitConfig, provider: Arc<dyn TextProvider>) -> Self {
        let app = Application::build_with_provider(config, provider)
            .await
            .expect("Failed to build application");
        let port = app.port();

        // The listener is already bound; requests queue until serve starts.
        tokio::spawn(async move {
            let _ = app.run_until_stopped().await;
        });

        Self {
            address: format!("http://localhost:{}", port),
            port,
        }
    }

    pub fn generate_url(&self) -> String {
        format!("{}/api/claude", self.address)
    }
}
