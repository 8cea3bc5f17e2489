use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as `{"error": <message>, "code": <code>}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Generation provider not configured")]
    ProviderMisconfigured,

    /// `context` is the client-facing message; `detail` is only logged.
    #[error("Generation provider unavailable: {detail}")]
    ProviderUnavailable {
        context: &'static str,
        detail: String,
    },

    #[error("Generation parse error: {0}")]
    GenerationParse(String),

    #[error("Storage unavailable: {0}")]
    Storage(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

const DEFAULT_PROVIDER_CONTEXT: &str = "The generation provider request failed";

impl AppError {
    /// Sets the message clients see when the provider call fails.
    /// Other variants pass through unchanged.
    pub fn with_provider_context(self, context: &'static str) -> Self {
        match self {
            AppError::ProviderUnavailable { detail, .. } => {
                AppError::ProviderUnavailable { context, detail }
            }
            other => other,
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::NotConfigured => AppError::ProviderMisconfigured,
            other => AppError::ProviderUnavailable {
                context: DEFAULT_PROVIDER_CONTEXT,
                detail: other.to_string(),
            },
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Missing or invalid bearer token".to_string(),
            ),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            AppError::ProviderMisconfigured => {
                tracing::error!("Generation requested but OPENAI_API_KEY is not set");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PROVIDER_MISCONFIGURED",
                    "OpenAI API key not configured".to_string(),
                )
            }
            AppError::ProviderUnavailable { context, detail } => {
                tracing::error!("Generation provider error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PROVIDER_UNAVAILABLE",
                    context.to_string(),
                )
            }
            AppError::GenerationParse(msg) => {
                tracing::error!("Generation parse error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_PARSE_ERROR",
                    "Failed to parse AI response".to_string(),
                )
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_UNAVAILABLE",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_input_is_bad_request_with_message() {
        let (status, json) = body_json(AppError::InvalidInput("mood must be 0-10".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "mood must be 0-10");
        assert_eq!(json["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_missing_credential_maps_to_not_configured_500() {
        let err: AppError = LlmError::NotConfigured.into();
        let (status, json) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "OpenAI API key not configured");
    }

    #[tokio::test]
    async fn test_provider_api_error_maps_to_unavailable() {
        let err: AppError = LlmError::Api {
            status: 503,
            message: "overloaded".into(),
        }
        .into();
        assert!(matches!(err, AppError::ProviderUnavailable { ref detail, .. } if detail.contains("503")));
        let (status, json) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "PROVIDER_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_provider_context_replaces_client_message() {
        let err = AppError::from(LlmError::EmptyContent).with_provider_context("Failed to generate tip");
        let (status, json) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Failed to generate tip");
    }

    #[test]
    fn test_provider_context_leaves_other_errors_alone() {
        let err = AppError::ProviderMisconfigured.with_provider_context("Failed to get chat response");
        assert!(matches!(err, AppError::ProviderMisconfigured));
    }

    #[tokio::test]
    async fn test_storage_error_hides_details() {
        let err: AppError = StoreError::Unavailable("connection refused".into()).into();
        let (status, json) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "A storage error occurred");
    }
}
