use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::retry::InvokeError;

/// Message shown to users when the model stays overloaded after retries.
pub const AI_BUSY_MESSAGE: &str = "AI busy. Please retry shortly.";
pub const SCORING_FAILED_MESSAGE: &str = "Resume scoring failed.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// The model answered, but not with a usable score document.
    #[error("Scoring failed: {0}")]
    ScoringFailed(String),

    /// Transient upstream failure that outlived the retry budget.
    #[error("LLM busy: {0}")]
    AiBusy(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<InvokeError> for AppError {
    fn from(err: InvokeError) -> Self {
        match err {
            InvokeError::Exhausted { .. } => AppError::AiBusy(err.to_string()),
            InvokeError::Fatal(inner) => AppError::Llm(inner.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::UnsupportedMediaType(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                msg.clone(),
            ),
            AppError::AiBusy(detail) => {
                tracing::warn!("LLM busy: {detail}");
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "AI_BUSY",
                    AI_BUSY_MESSAGE.to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::ScoringFailed(msg) => {
                tracing::error!("Scoring failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SCORING_FAILED",
                    SCORING_FAILED_MESSAGE.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
