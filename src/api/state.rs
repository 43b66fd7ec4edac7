//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::HealthCheck;
use crate::services::{AccountService, ServiceContainer};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account service
    pub account_service: Arc<dyn AccountService>,
    /// Storage health probe
    pub health: Arc<dyn HealthCheck>,
}

impl AppState {
    /// Create application state from a service container.
    pub fn from_services(container: &dyn ServiceContainer) -> Self {
        Self {
            account_service: container.accounts(),
            health: container.health(),
        }
    }

    /// Create application state with manually injected services.
    pub fn new(account_service: Arc<dyn AccountService>, health: Arc<dyn HealthCheck>) -> Self {
        Self {
            account_service,
            health,
        }
    }
}
