//! HTTP Basic authentication gate.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Basic, Authorization},
    TypedHeader,
};
use tracing::debug;

use common::AppError;
use domain::User;

use crate::state::AppState;

/// User whose Basic credentials were verified for this request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Require valid Basic credentials before the inner handler runs.
///
/// Missing, malformed and wrong credentials all end in a 401 with the
/// uniform body. No `WWW-Authenticate` challenge is sent.
pub async fn basic_auth_middleware(
    State(state): State<AppState>,
    credentials: Option<TypedHeader<Authorization<Basic>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(credentials) = credentials.ok_or_else(|| {
        debug!("Request to {} without Basic credentials", request.uri().path());
        AppError::Unauthorized
    })?;

    let user = state
        .auth
        .authenticate(credentials.username(), credentials.password())
        .await?;

    request.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(request).await)
}
