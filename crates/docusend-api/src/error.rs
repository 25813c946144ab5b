//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use docusend_core::error::{AppError, ErrorKind};
use docusend_entity::access::AccessDecision;

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// An [`AppError`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    inner: AppError,
    details: Option<serde_json::Value>,
}

/// Handler result type.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Attach the gate decision so clients can render the right screen.
    pub fn with_decision(mut self, decision: AccessDecision) -> Self {
        self.details = Some(serde_json::json!({ "decision": decision }));
        self
    }

    /// The response for a gate decision that ends the flow, if it is one.
    pub fn for_decision(decision: AccessDecision) -> Option<Self> {
        let err = match decision {
            AccessDecision::NotFound => AppError::not_found("Shared link not found"),
            AccessDecision::Unauthenticated => {
                AppError::authentication("Sign in to view this link")
            }
            AccessDecision::Expired => AppError::gone("This link has expired"),
            _ => return None,
        };
        Some(Self::from(err).with_decision(decision))
    }

    /// The wrapped domain error.
    pub fn inner(&self) -> &AppError {
        &self.inner
    }
}

impl From<AppError> for ApiError {
    fn from(inner: AppError) -> Self {
        Self {
            inner,
            details: None,
        }
    }
}

/// Status code and wire code for an error kind.
pub fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
        ErrorKind::Authorization => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Gone => (StatusCode::GONE, "GONE"),
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Cache
        | ErrorKind::Storage
        | ErrorKind::Configuration
        | ErrorKind::Serialization => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = status_for(self.inner.kind);

        // Server-side detail stays in the logs.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(kind = %self.inner.kind, error = ?self.inner, "Internal server error");
            "An internal error occurred".to_string()
        } else {
            self.inner.message
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
            details: self.details,
        };

        (status, Json(body)).into_response()
    }
}
