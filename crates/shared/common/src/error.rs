//! Unified boundary error handling.
//!
//! Every failure that reaches the HTTP boundary is rendered as the same
//! `ApiError` body: `{status, message, url, validationErrors?}`. The
//! `validationErrors` key is only present for validation failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{DomainError, FieldErrors};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Validation
    #[error("Validation error")]
    Validation(FieldErrors),

    #[error("{0}")]
    BadRequest(String),

    // Authentication
    #[error("Access error")]
    Unauthorized,

    // Resource errors
    #[error("Not Found")]
    NotFound,

    #[error("{0} already exists")]
    Conflict(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Uniform error body returned for every boundary failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// HTTP status code, repeated in the body
    pub status: u16,
    pub message: String,
    /// Request path that produced the error
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<FieldErrors>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            url: url.into(),
            validation_errors: None,
        }
    }

    /// Same error, attributed to `url`.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) => msg.clone(),

            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }

    /// Per-field violations, only for validation failures
    pub fn validation_errors(&self) -> Option<&FieldErrors> {
        match self {
            AppError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Render into the uniform body for the given request path.
    pub fn to_api_error(&self, url: impl Into<String>) -> ApiError {
        ApiError {
            validation_errors: self.validation_errors().cloned(),
            ..ApiError::new(self.status(), self.user_message(), url)
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for ApiError {
    /// The body is also attached as a response extension so an outer layer
    /// can re-render it with the request path.
    fn into_response(self) -> Response {
        let mut response = (self.status_code(), Json(&self)).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(String::new()).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::InvalidCredentials => AppError::Unauthorized,
            DomainError::Password(msg) | DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
