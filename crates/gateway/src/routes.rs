//! Route configuration.

use axum::{middleware, routing::any, Router};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{health_routes, login_routes, not_found, user_routes, API_PREFIX};
use crate::middleware::{error_responder, handle_panic};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(user_routes())
        .merge(login_routes(state.clone()));

    Router::new()
        .nest(API_PREFIX, api)
        .merge(health_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/error", any(not_found))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(error_responder))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
