use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use formrule_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for rule errors and adds request-level variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A rule-level error from `formrule_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body failed field-level checks.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] validator::ValidationErrors),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(CoreError::Configuration(msg)) => {
                tracing::warn!(error = %msg, "Rejected rule configuration");
                (StatusCode::BAD_REQUEST, "CONFIGURATION_ERROR", msg.clone())
            }
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::InvalidRequest(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_REQUEST",
                errors.to_string(),
            ),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
