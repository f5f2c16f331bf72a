//! User registration handler.

use axum::{extract::State, response::Json, routing::post, Router};

use common::{ApiError, AppResult, GenericResponse};
use domain::RegisterUser;

use crate::extractors::AppJson;
use crate::state::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", post(create_user))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/1.0/users",
    tag = "Users",
    request_body = RegisterUser,
    responses(
        (status = 200, description = "User saved", body = GenericResponse),
        (status = 400, description = "Validation error or malformed body", body = ApiError)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterUser>,
) -> AppResult<Json<GenericResponse>> {
    let response = state.users.register(payload).await?;
    Ok(Json(response))
}
