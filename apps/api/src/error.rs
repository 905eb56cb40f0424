//! Error types for the API.
//!
//! Every handler returns `ApiResult<T>`. The single `IntoResponse` impl
//! below turns any error into a status code and a `{ "message": ... }` body,
//! which is what the frontend reads (`err.response.data.message`).
//!
//! ```text
//! ValidationError ─┐
//! CoreError ───────┼──► ApiError ──► (status, { "message": ... })
//! DbError ─────────┤
//! JSON / query ────┘
//! ```

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use sweetify_core::{CoreError, ValidationError};
use sweetify_db::DbError;

/// Body of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

/// API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Input failed a validation rule.
    #[error("{0}")]
    Validation(String),

    /// Request is well-formed but cannot be honoured (stock, empty cart, ...).
    #[error("{0}")]
    BadRequest(String),

    /// Resource already exists. Reported as 400 on the wire.
    #[error("{0}")]
    Conflict(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not authorized, no token")]
    MissingToken,

    #[error("Not authorized, token failed")]
    InvalidToken,

    #[error("Not authorized as an admin")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    /// Database failure; details are logged, never returned.
    #[error("Database error: {0}")]
    Database(DbError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// 404 for identifiers that are not even well-formed.
    pub fn resource_not_found() -> Self {
        ApiError::NotFound("Resource not found".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) | ApiError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::InvalidCredentials | ApiError::MissingToken | ApiError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            ApiError::Database(_) | ApiError::Internal(_) => {
                error!(error = %self, "Request failed");
                "Internal server error".to_string()
            }
            ApiError::InvalidCredentials | ApiError::MissingToken | ApiError::InvalidToken => {
                warn!(error = %self, "Authentication rejected");
                self.to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::SweetNotFound(_) | CoreError::CartItemNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            CoreError::Validation(v) => ApiError::Validation(v.to_string()),
            CoreError::OutOfStock(_)
            | CoreError::InsufficientStock { .. }
            | CoreError::StockChanged { .. }
            | CoreError::EmptyCart
            | CoreError::CartTooLarge { .. }
            | CoreError::QuantityTooLarge { .. }
            | CoreError::StockLimitExceeded { .. }
            | CoreError::TotalTooLarge => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::resource_not_found(),
            ref e if e.is_unique_violation_on("users.username") => {
                ApiError::Conflict("Username already exists".to_string())
            }
            other => ApiError::Database(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Result type alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
