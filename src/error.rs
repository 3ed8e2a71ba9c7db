//! Application error type and its HTTP representation.
//!
//! Every fallible operation of the service layer returns [`AppError`]. The
//! variants map one-to-one onto the failure classes the callers care about:
//!
//! - [`AppError::Validation`] - malformed request body (400)
//! - [`AppError::InvalidUrl`] - URL is blank, unparseable or not http/https (422)
//! - [`AppError::NotFound`] - code is unknown or its record has expired (404)
//! - [`AppError::Persistence`] - the durable store failed (500)
//! - [`AppError::Internal`] - anything else (500)
//!
//! Cache failures never become an `AppError`: the services log them and carry on.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::url_validator::UrlValidationError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload returned in every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] UrlValidationError),

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Persistence { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn persistence(message: impl Into<String>, details: Value) -> Self {
        Self::Persistence {
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

    /// Not-found error for a short code, used for both unknown and expired codes.
    pub fn code_not_found(code: &str) -> Self {
        Self::not_found(
            format!("No URL found for code: {}", code),
            json!({ "code": code }),
        )
    }

    fn parts(&self) -> (StatusCode, &'static str, String, Value) {
        match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message.clone(),
                details.clone(),
            ),
            AppError::InvalidUrl(reason) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid_url",
                self.to_string(),
                json!({ "reason": reason.to_string() }),
            ),
            AppError::NotFound { message, details } => (
                StatusCode::NOT_FOUND,
                "not_found",
                message.clone(),
                details.clone(),
            ),
            AppError::Persistence { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "persistence_error",
                message.clone(),
                details.clone(),
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message.clone(),
                details.clone(),
            ),
        }
    }

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        self.parts().0
    }

    /// Converts the error into the payload used in JSON responses.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code, message, details) = self.parts();
        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return AppError::persistence(
                    "Unique constraint violation",
                    json!({ "constraint": db.constraint() }),
                );
            }
        }

        tracing::error!("Database error: {}", e);
        AppError::persistence("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        AppError::bad_request(
            "Request validation failed",
            json!({ "fields": fields, "errors": errors.to_string() }),
        )
    }
}
