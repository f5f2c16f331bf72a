//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

use crate::validation::FieldErrors;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// One or more fields of a candidate record failed validation
    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    /// Password hashing or hash parsing failed
    #[error("Password error: {0}")]
    Password(String),

    /// Supplied credentials do not match a stored user
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Internal domain error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create a password error
    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }
}

impl From<FieldErrors> for DomainError {
    fn from(errors: FieldErrors) -> Self {
        DomainError::Validation(errors)
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
