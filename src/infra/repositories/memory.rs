//! In-memory user repository.
//!
//! Backs `serve --storage memory` and the integration tests. Email
//! uniqueness is checked under the write lock, so concurrent saves of the
//! same address cannot both succeed.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::UserRepository;
use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};
use crate::infra::HealthCheck;

/// Process-local user store, kept in insertion order.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn save(&self, user: NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateEmail);
        }

        let user = user.into_user();
        users.push(user.clone());
        Ok(user)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }
}

#[async_trait]
impl HealthCheck for InMemoryUserStore {
    fn component(&self) -> &'static str {
        "memory"
    }

    async fn check(&self) -> AppResult<()> {
        Ok(())
    }
}
