//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::{Config, StorageBackend};
use crate::domain::Argon2Encoder;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::services::Services;

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }
    if let Some(storage) = args.storage {
        config.storage = storage;
    }

    let encoder = Argon2Encoder::new(config.hashing)?;

    let services = match config.storage {
        StorageBackend::Postgres => {
            let db = Database::connect(&config.database_url)
                .await
                .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;
            Services::from_database(Arc::new(db), encoder)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; users are lost on restart");
            Services::in_memory(encoder)
        }
    };

    let app = create_router(AppState::from_services(&services));

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
