//! Service Container - wires collaborators into the account service.
//!
//! Picks the user repository for the configured storage backend and
//! hands out shared trait objects to the HTTP layer.

use std::sync::Arc;

use super::{AccountManager, AccountService};
use crate::domain::Argon2Encoder;
use crate::infra::{Database, HealthCheck, InMemoryUserStore, UserStore};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get account service
    fn accounts(&self) -> Arc<dyn AccountService>;

    /// Get storage health probe
    fn health(&self) -> Arc<dyn HealthCheck>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    account_service: Arc<dyn AccountService>,
    health: Arc<dyn HealthCheck>,
}

impl Services {
    /// Create a container from already-built services
    pub fn new(account_service: Arc<dyn AccountService>, health: Arc<dyn HealthCheck>) -> Self {
        Self {
            account_service,
            health,
        }
    }

    /// Services backed by PostgreSQL
    pub fn from_database(database: Arc<Database>, encoder: Argon2Encoder) -> Self {
        let store = Arc::new(UserStore::new(database.connection()));
        let account_service = Arc::new(AccountManager::new(store, Arc::new(encoder)));

        Self {
            account_service,
            health: database,
        }
    }

    /// Services backed by a process-local store
    pub fn in_memory(encoder: Argon2Encoder) -> Self {
        let store = Arc::new(InMemoryUserStore::new());
        let account_service = Arc::new(AccountManager::new(store.clone(), Arc::new(encoder)));

        Self {
            account_service,
            health: store,
        }
    }
}

impl ServiceContainer for Services {
    fn accounts(&self) -> Arc<dyn AccountService> {
        self.account_service.clone()
    }

    fn health(&self) -> Arc<dyn HealthCheck> {
        self.health.clone()
    }
}
