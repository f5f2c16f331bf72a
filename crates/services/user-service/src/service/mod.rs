//! Application services - registration and credential checks.
//!
//! Services depend on the repository and hasher traits, never on the
//! concrete store, so they can be exercised against mocks.

mod auth_service;
mod container;
mod user_service;
mod validator;

pub use auth_service::{AuthService, Authenticator};
pub use container::Services;
pub use user_service::{UserManager, UserService, USER_SAVED_MESSAGE};
pub use validator::{RegistrationValidator, UniqueUsername};
