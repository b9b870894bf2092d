//! Error handling and HTTP error conversion
//!
//! This module defines how domain errors are translated to HTTP error responses.
//!
//! # Architecture
//!
//! Errors from `petclinic_core` are converted to HTTP responses with
//! appropriate status codes and error messages. This conversion happens at the
//! HTTP boundary and never exposes storage details to clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use petclinic_core::Error;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Standard error response for all API errors.
///
/// All error responses follow this consistent structure to provide
/// machine-readable error codes and human-readable messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetails,
}

/// Error details structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Additional context (optional, type varies by error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Axum response wrapper for API errors
///
/// Handlers return `Result<_, ApiError>` and use `?` on repository calls;
/// the domain error is mapped to a status code when the response is built.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(State(state): State<AppState>) -> Result<Json<Vec<PetTypeResponse>>, ApiError> {
///     let types = state.owners.find_pet_types().await?;
///     Ok(Json(types.into_iter().map(Into::into).collect()))
/// }
/// ```
#[derive(Debug)]
pub enum ApiError {
    /// Error raised by the domain or storage layer
    Domain(Error),

    /// Failure raised by the HTTP layer itself
    Internal(String),
}

impl ApiError {
    /// Create a validation error with field information
    pub fn validation_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Domain(Error::validation(field, message))
    }

    /// Create a not found error
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        ApiError::Domain(Error::not_found(entity, id))
    }

    /// Create an internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Domain(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Domain(err) => write!(f, "{}", err),
            ApiError::Internal(message) => write!(f, "{}", message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = convert_error(&self);

        // Log error server-side
        log_error(&self, status);

        (status, Json(error_response)).into_response()
    }
}

/// Convert an API error to HTTP status code and error response.
pub(crate) fn convert_error(error: &ApiError) -> (StatusCode, ErrorResponse) {
    let (status, code, message, details) = match error {
        ApiError::Domain(Error::NotFound { entity, id }) => (
            StatusCode::NOT_FOUND,
            "NotFound",
            error.to_string(),
            Some(json!({ "entity": entity, "id": id })),
        ),
        ApiError::Domain(Error::Validation { field, .. }) => (
            StatusCode::BAD_REQUEST,
            "ValidationError",
            error.to_string(),
            Some(json!({ "field": field })),
        ),
        ApiError::Domain(Error::Storage(_))
        | ApiError::Domain(Error::Configuration(_))
        | ApiError::Internal(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "InternalError",
            "An internal error occurred".to_string(),
            None,
        ),
    };

    (
        status,
        ErrorResponse {
            error: ErrorDetails {
                code: code.to_string(),
                message,
                details,
            },
        },
    )
}

/// Log error with appropriate level based on HTTP status
fn log_error(error: &ApiError, status: StatusCode) {
    match status {
        StatusCode::INTERNAL_SERVER_ERROR | StatusCode::BAD_GATEWAY => {
            tracing::error!("API error: {} - {}", status, error);
        }
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
            tracing::warn!("API error: {} - {}", status, error);
        }
        _ => {
            tracing::info!("API error: {} - {}", status, error);
        }
    }
}
