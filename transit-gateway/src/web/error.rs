//! Request validation and error-to-response translation.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::sl::SlError;

use super::dto::{ErrorResponse, ValidationErrorResponse};

/// One rejected request parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Machine-readable kind, e.g. `invalid_type`
    pub code: &'static str,

    /// Where the parameter came from and its name, e.g. `["query", "q"]`
    pub path: Vec<String>,

    /// Human-readable description
    pub message: String,
}

impl ValidationIssue {
    /// A required parameter was absent.
    pub fn required(location: &str, name: &str) -> Self {
        Self {
            code: "invalid_type",
            path: vec![location.to_string(), name.to_string()],
            message: "Required".to_string(),
        }
    }

    /// A parameter was present but malformed.
    pub fn invalid(location: &str, name: &str, message: impl Into<String>) -> Self {
        Self {
            code: "invalid_value",
            path: vec![location.to_string(), name.to_string()],
            message: message.into(),
        }
    }
}

/// A request rejected before any upstream call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid request: {}", summarize(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }
}

impl From<ValidationIssue> for ValidationError {
    fn from(issue: ValidationIssue) -> Self {
        Self::new(vec![issue])
    }
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{}: {}", i.path.join("."), i.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] SlError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(err) => {
                tracing::debug!(error = %err, "rejected request");

                let body = ValidationErrorResponse {
                    message: err.to_string(),
                    errors: err.issues.clone(),
                    cause: err.issues,
                };
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            AppError::Upstream(err) => {
                // Detail stays in the logs; clients only learn which kind of failure.
                let (status, message) = if err.is_timeout() {
                    (StatusCode::GATEWAY_TIMEOUT, "upstream request timed out")
                } else {
                    (StatusCode::BAD_GATEWAY, "upstream request failed")
                };

                tracing::error!(%status, error = %err, "upstream request failed");

                let body = ErrorResponse {
                    message: message.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
