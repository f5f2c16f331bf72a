//! Login handler.
//!
//! The Basic auth gate has already verified the caller by the time the
//! handler runs; it only projects the user.

use axum::{extract::Extension, middleware, response::Json, routing::post, Router};

use common::ApiError;
use domain::UserProfile;

use crate::middleware::{basic_auth_middleware, AuthenticatedUser};
use crate::state::AppState;

/// Create login routes, guarded by Basic authentication
pub fn login_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route_layer(middleware::from_fn_with_state(state, basic_auth_middleware))
}

/// Authenticate with Basic credentials and return the caller's profile
#[utoipa::path(
    post,
    path = "/api/1.0/login",
    tag = "Authentication",
    security(("basic_auth" = [])),
    responses(
        (status = 200, description = "Authenticated user", body = UserProfile),
        (status = 401, description = "Access error", body = ApiError)
    )
)]
pub async fn login(
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> Json<UserProfile> {
    Json(UserProfile::from(user))
}
