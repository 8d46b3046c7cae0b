//! HTTP handlers for the outfit service.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;
use std::time::Duration;
use validator::Validate;

use crate::models::{EnrichedOutfit, GenerationRequest, OutfitResponse};
use crate::services::outfit::{enrich, fallback_reply, parse_reply};
use crate::services::prompt::{build_prompt, DEFAULT_DAY};
use crate::services::providers::{GenerationParams, ProviderError};
use crate::startup::AppState;
use service_core::error::AppError;

/// Response source tag; fixed for both the model and fallback paths.
const SOURCE_TAG: &str = "claude";

/// Minimum number of wardrobe items required to assemble an outfit.
const MIN_WARDROBE_ITEMS: usize = 3;

/// Service identity and status.
pub async fn service_info(State(state): State<AppState>) -> impl IntoResponse {
    let provider = match state.text_provider.health_check().await {
        Ok(()) => "ok",
        Err(_) => "unconfigured",
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "outfit-service",
            "version": env!("CARGO_PKG_VERSION"),
            "provider": provider,
            "timestamp": Utc::now().to_rfc3339(),
        })),
    )
}

/// Connectivity echo for the generation endpoint.
pub async fn echo(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "message": "outfit generation endpoint reachable",
            "configured": state.config.anthropic.api_key.is_some(),
            "model": state.config.anthropic.model,
            "timestamp": Utc::now().to_rfc3339(),
        })),
    )
}

/// Generate a three-slot outfit recommendation from the caller's wardrobe.
#[tracing::instrument(skip(state, request))]
pub async fn generate_outfit(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<OutfitResponse>, AppError> {
    request.validate()?;

    let received = request.wardrobe.len();
    if received < MIN_WARDROBE_ITEMS {
        return Err(AppError::InvalidInput {
            message: format!(
                "wardrobe must contain at least {} items",
                MIN_WARDROBE_ITEMS
            ),
            received,
        });
    }

    if state.config.anthropic.api_key.is_none() {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "ANTHROPIC_API_KEY is not set; export it to enable outfit generation"
        )));
    }

    let day = request
        .day_name
        .clone()
        .unwrap_or_else(|| DEFAULT_DAY.to_string());

    let prompt = build_prompt(
        &request.wardrobe,
        request.weather.as_ref(),
        &request.occasion,
        &day,
        state.config.generation.prompt_item_cap,
    );

    let params = GenerationParams {
        max_tokens: state.config.generation.max_tokens,
        temperature: state.config.generation.temperature,
    };

    // Single attempt under a hard deadline; the abandoned call is dropped,
    // never retried.
    let deadline = Duration::from_secs(state.config.generation.upstream_timeout_secs);
    let upstream = tokio::time::timeout(deadline, state.text_provider.generate(&prompt, &params))
        .await
        .map_err(|_| AppError::UpstreamTimeout {
            seconds: deadline.as_secs(),
        })?;

    let upstream = match upstream {
        Ok(response) => response,
        Err(ProviderError::Timeout) => {
            return Err(AppError::UpstreamTimeout {
                seconds: deadline.as_secs(),
            })
        }
        Err(ProviderError::Api { status, message }) => {
            return Err(AppError::UpstreamError { status, message })
        }
        Err(e) => return Err(AppError::InternalError(anyhow::anyhow!(e))),
    };

    let text = match upstream.text {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(AppError::EmptyUpstreamResponse),
    };

    let reply = match parse_reply(&text) {
        Some(parsed) => parsed,
        None => {
            tracing::warn!("Model reply was not parseable as an outfit; using fallback selection");
            fallback_reply(&request.wardrobe)
        }
    };

    let outfit = EnrichedOutfit {
        top: enrich(&reply.outfit.top, &request.wardrobe),
        bottom: enrich(&reply.outfit.bottom, &request.wardrobe),
        shoes: enrich(&reply.outfit.shoes, &request.wardrobe),
    };

    tracing::info!(
        occasion = %request.occasion,
        wardrobe_items = received,
        "Outfit generated"
    );

    Ok(Json(OutfitResponse {
        success: true,
        outfit,
        descripcion: reply.descripcion,
        tips: reply.tips,
        day,
        weather: request.weather,
        generated_at: Utc::now(),
        source: SOURCE_TAG.to_string(),
    }))
}
