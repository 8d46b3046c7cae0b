use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String, received: usize },

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("Upstream error ({status}): {message}")]
    UpstreamError { status: u16, message: String },

    #[error("Upstream returned an empty response")]
    EmptyUpstreamResponse,

    #[error("Upstream call exceeded {seconds}s deadline")]
    UpstreamTimeout { seconds: u64 },

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            hint: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            received: Option<usize>,
            timestamp: String,
        }

        let (status, error_message, details, hint, received) = match self {
            AppError::ValidationError(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation error".to_string(),
                Some(err.to_string()),
                None,
                None,
            ),
            AppError::InvalidInput { message, received } => (
                StatusCode::BAD_REQUEST,
                message,
                None,
                None,
                Some(received),
            ),
            AppError::ConfigError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Configuration error".to_string(),
                None,
                Some(err.to_string()),
                None,
            ),
            AppError::UpstreamError { status, message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Upstream service error ({})", status),
                Some(message),
                None,
                None,
            ),
            AppError::EmptyUpstreamResponse => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Upstream returned an empty response".to_string(),
                None,
                None,
                None,
            ),
            AppError::UpstreamTimeout { seconds } => (
                StatusCode::REQUEST_TIMEOUT,
                format!("Upstream call exceeded {}s deadline", seconds),
                None,
                None,
                None,
            ),
            AppError::InternalError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                Some(err.to_string()),
                None,
                None,
            ),
        };

        (
            status,
            Json(ErrorResponse {
                error: error_message,
                details,
                hint,
                received,
                timestamp: Utc::now().to_rfc3339(),
            }),
        )
            .into_response()
    }
}
