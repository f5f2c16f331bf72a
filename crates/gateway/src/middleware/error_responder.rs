//! Error responder.
//!
//! Every error response leaving the router has the uniform `ApiError` body,
//! stamped with the path of the request that produced it. Handlers render
//! `AppError`s without knowing the path; this layer fills it in and also
//! covers framework responses (e.g. 405) and panics.

use std::any::Any;

use axum::{
    extract::Request,
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE, WWW_AUTHENTICATE},
        StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

use common::ApiError;

const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Response extension marking an error body the responder must leave as is.
#[derive(Debug, Clone, Copy)]
pub struct PreserveBody;

/// Re-render error responses with the request path as `url`.
pub async fn error_responder(request: Request, next: Next) -> Response {
    let url = request.uri().path().to_string();
    let response = next.run(request).await;

    let status = response.status();
    if !(status.is_client_error() || status.is_server_error())
        || response.extensions().get::<PreserveBody>().is_some()
    {
        return response;
    }

    let (mut parts, _body) = response.into_parts();
    let api_error = parts.extensions.remove::<ApiError>().unwrap_or_else(|| {
        ApiError::new(
            status,
            status.canonical_reason().unwrap_or("Error"),
            String::new(),
        )
    });

    parts.headers.remove(CONTENT_TYPE);
    parts.headers.remove(CONTENT_LENGTH);
    parts.headers.remove(WWW_AUTHENTICATE);

    let (rendered, body) = api_error.with_url(url).into_response().into_parts();
    parts.headers.extend(rendered.headers);
    parts.extensions.extend(rendered.extensions);

    Response::from_parts(parts, body)
}

/// Panic handler for `CatchPanicLayer`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!("Handler panicked: {}", detail);

    ApiError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_ERROR_MESSAGE,
        String::new(),
    )
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, middleware, routing::get, Router};
    use common::AppError;
    use tower::ServiceExt;
    use tower_http::catch_panic::CatchPanicLayer;

    async fn failing() -> Result<&'static str, AppError> {
        Err(AppError::NotFound)
    }

    async fn panicking() -> &'static str {
        panic!("handler blew up")
    }

    async fn preserved() -> Response {
        let mut response = (StatusCode::SERVICE_UNAVAILABLE, "down").into_response();
        response.extensions_mut().insert(PreserveBody);
        response
    }

    fn router() -> Router {
        Router::new()
            .route("/ok", get(|| async { "fine" }))
            .route("/failing", get(failing))
            .route("/panicking", get(panicking))
            .route("/preserved", get(preserved))
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(middleware::from_fn(error_responder))
    }

    async fn send(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let response = router()
            .oneshot(Request::builder().uri("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.extensions().get::<ApiError>().is_none());
    }

    #[tokio::test]
    async fn test_app_error_gets_request_path() {
        let (status, body) = send("/failing").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], 404);
        assert_eq!(body["message"], "Not Found");
        assert_eq!(body["url"], "/failing");
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error() {
        let (status, body) = send("/panicking").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], 500);
        assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
        assert_eq!(body["url"], "/panicking");
        assert!(body.get("validationErrors").is_none());
    }

    #[tokio::test]
    async fn test_framework_rejection_is_uniform() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/ok")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], 405);
        assert_eq!(body["message"], "Method Not Allowed");
        assert_eq!(body["url"], "/ok");
    }

    #[tokio::test]
    async fn test_preserved_body_is_left_alone() {
        let response = router()
            .oneshot(Request::builder().uri("/preserved").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(response.extensions().get::<ApiError>().is_none());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"down");
    }
}
