//! Application startup and lifecycle management.
//!
//! Provides the HTTP server and shared state for the outfit service.

use crate::config::OutfitConfig;
use crate::handlers;
use crate::services::providers::anthropic::{AnthropicConfig, AnthropicTextProvider};
use crate::services::providers::TextProvider;
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use service_core::error::AppError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

/// Request bodies above this size are rejected before deserialization.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: OutfitConfig,
    pub text_provider: Arc<dyn TextProvider>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the Anthropic provider.
    pub async fn build(config: OutfitConfig) -> Result<Self, AppError> {
        let provider_config = AnthropicConfig {
            api_key: config.anthropic.api_key.clone().unwrap_or_default(),
            model: config.anthropic.model.clone(),
            api_base: config.anthropic.api_base.clone(),
        };
        let text_provider: Arc<dyn TextProvider> =
            Arc::new(AnthropicTextProvider::new(provider_config));

        tracing::info!(
            model = %config.anthropic.model,
            "Initialized Anthropic text provider"
        );

        Self::build_with_provider(config, text_provider).await
    }

    /// Build the application with an injected provider (used by tests).
    pub async fn build_with_provider(
        config: OutfitConfig,
        text_provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            text_provider,
        };

        // Bind the listener up front (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Outfit service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router).await.map_err(|e| {
            tracing::error!("HTTP server error: {}", e);
            std::io::Error::other(format!("HTTP server error: {}", e))
        })
    }
}

/// Assemble the router with the shared middleware stack.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::service_info))
        .route(
            "/api/claude",
            get(handlers::echo).post(handlers::generate_outfit),
        )
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
}

/// Last-resort responder: a panicking handler answers with a JSON 500
/// instead of tearing the connection down.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Internal server error",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
        .into_response()
}
