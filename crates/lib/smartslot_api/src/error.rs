//! Application error types.
//!
//! Every failure leaves the API as the uniform envelope
//! `{ "success": false, "error": { "message": ... } }` with a mapped
//! status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Too many requests, please try again later")]
    RateLimited,

    #[error("Database unavailable: {0}")]
    DbUnavailable(String),

    #[error("LLM provider unavailable: {0}")]
    LlmUnavailable(String),

    #[error("Internal server error")]
    Internal(String),
}

/// Failure envelope body.
#[derive(Serialize)]
struct ErrorEnvelope {
    success: bool,
    error: ErrorMessage,
}

#[derive(Serialize)]
struct ErrorMessage {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.clone()),
            AppError::Forbidden(m) => (StatusCode::FORBIDDEN, m.clone()),
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests, please try again later".to_string(),
            ),
            AppError::DbUnavailable(m) => {
                error!("database unavailable: {m}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Database unavailable".to_string(),
                )
            }
            AppError::LlmUnavailable(m) => {
                error!("LLM provider unavailable: {m}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "LLM provider unavailable".to_string(),
                )
            }
            AppError::Internal(m) => {
                error!("internal error: {m}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        let body = Json(ErrorEnvelope {
            success: false,
            error: ErrorMessage { message },
        });
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("row not found".into()),
            _ => AppError::Internal(e.to_string()),
        }
    }
}

impl From<smartslot_core::auth::AuthError> for AppError {
    fn from(e: smartslot_core::auth::AuthError) -> Self {
        use smartslot_core::auth::AuthError;
        match e {
            AuthError::CredentialError => AppError::Unauthorized("Invalid credentials".into()),
            AuthError::InvalidSignature => AppError::Unauthorized("Invalid token".into()),
            AuthError::Expired => AppError::Unauthorized("Token expired".into()),
            AuthError::ValidationError(msg) => AppError::Validation(msg),
            AuthError::DbError(e) => AppError::from(e),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<smartslot_core::scheduling::SchedulingError> for AppError {
    fn from(e: smartslot_core::scheduling::SchedulingError) -> Self {
        use smartslot_core::scheduling::SchedulingError;
        match e {
            SchedulingError::NotFound(msg) => AppError::NotFound(msg),
            SchedulingError::Validation(msg) => AppError::Validation(msg),
            SchedulingError::Db(e) => AppError::from(e),
        }
    }
}

impl From<smartslot_core::llm::LlmError> for AppError {
    fn from(e: smartslot_core::llm::LlmError) -> Self {
        use smartslot_core::llm::LlmError;
        match e {
            LlmError::Config(msg) => AppError::Validation(msg),
            LlmError::Provider(msg) => AppError::LlmUnavailable(msg),
            LlmError::Parse(msg) => AppError::Internal(format!("LLM response: {msg}")),
        }
    }
}
