use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

use crate::domain::sources::SourceError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    Configuration { message: String, details: Value },
    Upstream { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn configuration(message: impl Into<String>, details: Value) -> Self {
        Self::Configuration {
            message: message.into(),
            details,
        }
    }
    pub fn upstream(message: impl Into<String>, details: Value) -> Self {
        Self::Upstream {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Human-readable message, used by the CLI.
    pub fn message(&self) -> &str {
        match self {
            AppError::Validation { message, .. }
            | AppError::Configuration { message, .. }
            | AppError::Upstream { message, .. }
            | AppError::Internal { message, .. } => message,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::Configuration { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "configuration_error",
                message,
                details,
            ),
            AppError::Upstream { message, details } => {
                (StatusCode::BAD_GATEWAY, "upstream_error", message, details)
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Invalid request parameters", details)
    }
}

/// Malformed query strings (`max=abc`, `max=-1`) get the same JSON body as
/// validation failures instead of axum's plain-text rejection.
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(
            "Invalid query string",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

/// Maps a failure of the curated photo leg to an HTTP-facing error.
///
/// A missing API key is a configuration problem; everything else is an
/// upstream failure reported with the source's own message.
impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::MissingApiKey(source) => AppError::configuration(
                format!("Missing API key for {source}"),
                json!({ "source": source }),
            ),
            other => AppError::upstream(
                format!("Photo retrieval failed: {other}"),
                json!({ "source": "curated" }),
            ),
        }
    }
}
