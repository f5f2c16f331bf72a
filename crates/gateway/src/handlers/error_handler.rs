//! Fallback for unknown routes and the explicit error path.

use common::AppError;

/// Uniform 404; the error responder fills in the url.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
