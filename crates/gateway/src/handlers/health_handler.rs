//! Health check handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use crate::middleware::PreserveBody;
use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Health check endpoint - verifies store connectivity.
///
/// The 503 body is the health report itself, not the uniform error shape.
pub async fn health_check(State(state): State<AppState>) -> Response {
    match state.database.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                error: None,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            let mut response = (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy",
                    error: Some(e.to_string()),
                }),
            )
                .into_response();
            response.extensions_mut().insert(PreserveBody);
            response
        }
    }
}
