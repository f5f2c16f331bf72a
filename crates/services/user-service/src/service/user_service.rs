//! User service - registration of new users.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use common::{AppError, AppResult, GenericResponse};
use domain::{CredentialHasher, RegisterUser};

use super::validator::{duplicate_username, RegistrationValidator};
use crate::repository::UserRepository;

/// Acknowledgment returned after a successful registration
pub const USER_SAVED_MESSAGE: &str = "User saved";

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Validate, hash and persist a new user.
    ///
    /// Fails with `AppError::Validation` carrying every field violation;
    /// the store is not written in that case.
    async fn register(&self, candidate: RegisterUser) -> AppResult<GenericResponse>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
    validator: RegistrationValidator,
}

impl UserManager {
    /// Create new user service instance with repository and hasher
    pub fn new(repo: Arc<dyn UserRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self {
            validator: RegistrationValidator::new(repo.clone()),
            repo,
            hasher,
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn register(&self, candidate: RegisterUser) -> AppResult<GenericResponse> {
        let registration = self.validator.validate(candidate).await?;
        let password = self.hasher.hash(&registration.password)?;
        let new_user = registration.into_new_user(password);

        // A concurrent registration may have taken the name after validation
        let user = self.repo.save(new_user).await.map_err(|e| match e {
            AppError::Conflict(_) => AppError::Validation(duplicate_username()),
            other => other,
        })?;

        info!(user_id = user.id, username = %user.username, "User registered");
        Ok(GenericResponse::new(USER_SAVED_MESSAGE))
    }
}
