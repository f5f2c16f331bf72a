//! User repository implementation.
//!
//! The store does not decide whether a username is free; the registration
//! validator does. The unique index is the backstop, and a violation of it
//! surfaces as `AppError::Conflict`.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{NewUser, User, FIELD_USERNAME};

#[cfg(test)]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by exact username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a validated user with an already hashed password
    async fn save(&self, user: NewUser) -> AppResult<User>;

    /// Number of stored users
    async fn count(&self) -> AppResult<u64>;

    /// All users in insertion order
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Remove every user, returning how many were deleted
    async fn delete_all(&self) -> AppResult<u64>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn map_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!("Unique constraint violated on insert: {}", detail);
            AppError::conflict(FIELD_USERNAME)
        }
        _ => AppError::from(err),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn save(&self, user: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            username: Set(user.username),
            surname: Set(user.surname),
            password_hash: Set(user.password_hash),
            image: Set(user.image),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(map_insert_error)?;
        Ok(User::from(model))
    }

    async fn count(&self) -> AppResult<u64> {
        UserEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = UserEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
