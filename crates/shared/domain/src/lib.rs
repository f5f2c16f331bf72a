//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user entity and its projections, the registration field rules and
//! the credential hasher.

pub mod constants;
pub mod error;
pub mod password;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::{Argon2Hasher, CredentialHasher, Password};
pub use user::{NewUser, RegisterUser, User, UserProfile, ValidRegistration};
pub use validation::{validate_registration, FieldErrors};
