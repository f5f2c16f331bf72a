//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - The boundary error type and the uniform error body
//! - Success response bodies
//! - Configuration structures

pub mod config;
pub mod error;
pub mod response;

pub use config::*;
pub use error::{ApiError, AppError, AppResult};
pub use response::GenericResponse;
