//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - User repositories (SeaORM and in-memory)
//! - Health probes

pub mod db;
mod health;
pub mod repositories;

pub use db::{Database, Migrator};
pub use health::HealthCheck;
pub use repositories::{InMemoryUserStore, UserRepository, UserStore};

#[cfg(test)]
pub use repositories::MockUserRepository;
