//! Authentication service - verifies Basic credentials against the store.
//!
//! Stateless: a successful check yields the stored user for this request
//! only. No session or token is issued.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use common::{AppError, AppResult};
use domain::{CredentialHasher, User};

use crate::repository::UserRepository;

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Return the user whose stored hash matches `password`.
    ///
    /// Unknown usernames and wrong passwords fail identically with
    /// `AppError::Unauthorized`.
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<User>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    repo: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(repo: Arc<dyn UserRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { repo, hasher }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        match self.repo.find_by_username(username).await? {
            Some(user) if self.hasher.verify(password, &user.password()) => {
                info!(user_id = user.id, role = user.role(), "User authenticated");
                Ok(user)
            }
            Some(_) => {
                warn!(username = %username, "Login rejected: wrong password");
                Err(AppError::Unauthorized)
            }
            None => {
                warn!(username = %username, "Login rejected: unknown user");
                Err(AppError::Unauthorized)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use chrono::Utc;
    use domain::{Argon2Hasher, Password};

    fn stored_user(plain: &str) -> User {
        User {
            id: 42,
            username: "test-user".to_string(),
            surname: "test-surname".to_string(),
            password_hash: Password::new(plain).unwrap().into_string(),
            image: None,
            created_at: Utc::now(),
        }
    }

    fn authenticator(repo: MockUserRepository) -> Authenticator {
        Authenticator::new(Arc::new(repo), Arc::new(Argon2Hasher))
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let user = stored_user("P4ssword@");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let result = authenticator(repo)
            .authenticate("test-user", "P4ssword@")
            .await
            .unwrap();

        assert_eq!(result.id, 42);
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let user = stored_user("P4ssword@");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));

        let err = authenticator(repo)
            .authenticate("test-user", "P@ssw0rd")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));

        let err = authenticator(repo)
            .authenticate("nobody", "P4ssword@")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized));
    }
}
