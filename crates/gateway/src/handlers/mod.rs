//! HTTP request handlers.

pub mod error_handler;
pub mod health_handler;
pub mod login_handler;
pub mod user_handler;

pub use error_handler::not_found;
pub use health_handler::health_routes;
pub use login_handler::login_routes;
pub use user_handler::user_routes;

/// Versioned API prefix
pub const API_PREFIX: &str = "/api/1.0";
