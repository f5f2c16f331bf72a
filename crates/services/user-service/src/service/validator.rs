//! Registration validation that needs persisted state.

use std::sync::Arc;

use tracing::debug;

use common::{AppError, AppResult};
use domain::{
    FieldErrors, RegisterUser, ValidRegistration, FIELD_USERNAME, MSG_DUPLICATE_USERNAME,
};

use crate::repository::UserRepository;

/// Reports whether a candidate username is already taken.
#[derive(Clone)]
pub struct UniqueUsername {
    repo: Arc<dyn UserRepository>,
}

impl UniqueUsername {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// True when no stored user has exactly this username.
    pub async fn is_available(&self, username: &str) -> AppResult<bool> {
        Ok(self.repo.find_by_username(username).await?.is_none())
    }
}

/// Field rules plus the uniqueness check, reported as one field-to-message mapping.
#[derive(Clone)]
pub struct RegistrationValidator {
    unique_username: UniqueUsername,
}

impl RegistrationValidator {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self {
            unique_username: UniqueUsername::new(repo),
        }
    }

    /// Check every rule once and hand back the validated registration.
    ///
    /// Uniqueness is only consulted once the username passed its own null
    /// and length rules, so each field reports its first failing rule. Any
    /// violation fails with `AppError::Validation` carrying all of them.
    pub async fn validate(&self, candidate: RegisterUser) -> AppResult<ValidRegistration> {
        let mut errors = candidate.validate();

        if let Some(username) = candidate.username.as_deref() {
            if !errors.contains(FIELD_USERNAME)
                && !self.unique_username.is_available(username).await?
            {
                errors.insert(FIELD_USERNAME, MSG_DUPLICATE_USERNAME);
            }
        }

        if !errors.is_empty() {
            debug!("Registration rejected: {}", errors);
            return Err(AppError::Validation(errors));
        }

        Ok(candidate.into_valid(errors)?)
    }
}

/// The violation reported for a taken username.
pub(crate) fn duplicate_username() -> FieldErrors {
    FieldErrors::single(FIELD_USERNAME, MSG_DUPLICATE_USERNAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use chrono::Utc;
    use domain::{User, MSG_NOT_NULL};

    fn stored(username: &str) -> User {
        User {
            id: 1,
            username: username.to_string(),
            surname: "test-surname".to_string(),
            password_hash: "hashed".to_string(),
            image: None,
            created_at: Utc::now(),
        }
    }

    fn candidate(username: Option<&str>) -> RegisterUser {
        RegisterUser {
            username: username.map(str::to_string),
            surname: Some("test-surname".to_string()),
            password: Some("P4ssword@".to_string()),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_taken_username_is_reported() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .times(1)
            .returning(|name| Ok(Some(stored(name))));

        let validator = RegistrationValidator::new(Arc::new(repo));
        let err = validator
            .validate(candidate(Some("test-user")))
            .await
            .unwrap_err();

        assert_eq!(err.validation_errors(), Some(&duplicate_username()));
    }

    #[tokio::test]
    async fn test_free_username_passes() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let validator = RegistrationValidator::new(Arc::new(repo));
        let valid = validator
            .validate(candidate(Some("test-user")))
            .await
            .unwrap();

        assert_eq!(valid.username, "test-user");
        assert_eq!(valid.password, "P4ssword@");
    }

    #[tokio::test]
    async fn test_store_not_consulted_for_invalid_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().never();

        let validator = RegistrationValidator::new(Arc::new(repo));

        let err = validator.validate(candidate(None)).await.unwrap_err();
        assert_eq!(
            err.validation_errors().unwrap().get(FIELD_USERNAME),
            Some(MSG_NOT_NULL)
        );

        let err = validator.validate(candidate(Some("abc"))).await.unwrap_err();
        assert_eq!(
            err.validation_errors().unwrap().get(FIELD_USERNAME),
            Some("It must have minimum 4 and maximum 255 characters")
        );
    }
}
