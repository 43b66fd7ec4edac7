//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;

use clap::ValueEnum;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_HASH_ITERATIONS, DEFAULT_HASH_MEMORY_KIB,
    DEFAULT_HASH_PARALLELISM, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, STORAGE_MEMORY,
    STORAGE_POSTGRES,
};

/// Where user records live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// PostgreSQL through SeaORM
    Postgres,
    /// Process-local store, lost on restart
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            STORAGE_POSTGRES => Ok(StorageBackend::Postgres),
            STORAGE_MEMORY => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

/// Argon2 cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashSettings {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashSettings {
    fn default() -> Self {
        Self {
            memory_kib: DEFAULT_HASH_MEMORY_KIB,
            iterations: DEFAULT_HASH_ITERATIONS,
            parallelism: DEFAULT_HASH_PARALLELISM,
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub storage: StorageBackend,
    pub hashing: HashSettings,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("storage", &self.storage)
            .field("hashing", &self.hashing)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            storage: StorageBackend::Postgres,
            hashing: HashSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing or malformed values fall back to the defaults in `constants`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let storage = match env::var("STORAGE_BACKEND") {
            Ok(raw) => raw.parse::<StorageBackend>().unwrap_or_else(|e| {
                tracing::warn!("{}, falling back to postgres", e);
                StorageBackend::Postgres
            }),
            Err(_) => StorageBackend::Postgres,
        };

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_env("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT),
            storage,
            hashing: HashSettings {
                memory_kib: parse_env("HASH_MEMORY_KIB").unwrap_or(DEFAULT_HASH_MEMORY_KIB),
                iterations: parse_env("HASH_ITERATIONS").unwrap_or(DEFAULT_HASH_ITERATIONS),
                parallelism: parse_env("HASH_PARALLELISM").unwrap_or(DEFAULT_HASH_PARALLELISM),
            },
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
