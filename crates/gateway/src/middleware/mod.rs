//! Middleware for authentication and error rendering.

mod basic_auth;
mod error_responder;

pub use basic_auth::{basic_auth_middleware, AuthenticatedUser};
pub use error_responder::{error_responder, handle_panic, PreserveBody};
