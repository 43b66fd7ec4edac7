//! User repository: the persistence collaborator of the account service.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::config::USERS_EMAIL_INDEX;
use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Implementations must reject a second user with the same email,
/// reporting it as `AppError::DuplicateEmail`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Persist a new user, assigning its identity
    async fn save(&self, user: NewUser) -> AppResult<User>;

    /// List every user, oldest first
    async fn find_all(&self) -> AppResult<Vec<User>>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn save(&self, user: NewUser) -> AppResult<User> {
        let record = user.into_user();
        let active_model = ActiveModel {
            id: Set(record.id),
            username: Set(record.username),
            email: Set(record.email),
            password_hash: Set(record.password_hash),
            created_at: Set(record.created_at),
        };

        let model = active_model.insert(&self.db).await.map_err(insert_error)?;
        Ok(User::from(model))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }
}

/// A unique violation on the email index is the duplicate-email case;
/// everything else stays a database error.
fn insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) if is_email_violation(&detail) => {
            AppError::DuplicateEmail
        }
        _ => AppError::Database(err),
    }
}

/// Postgres reports the violated index by name, not by column.
fn is_email_violation(detail: &str) -> bool {
    detail.contains(USERS_EMAIL_INDEX)
}
