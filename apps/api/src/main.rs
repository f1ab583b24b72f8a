//! Crudbase API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dto;
mod error;
mod extract;
mod handlers;
mod middleware;
mod state;

use crudbase_core::AppError;
use tracing::info;

use crate::api_config::{ApiConfig, StorageBackendConfig, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let pool = match &config.storage_backend {
        StorageBackendConfig::Postgres {
            database_url,
            max_connections,
        } => Some(api_services::connect_and_migrate(database_url, *max_connections).await?),
        StorageBackendConfig::InMemory => None,
    };

    if config.migrate_only {
        if pool.is_some() {
            info!("database migrations applied successfully");
        } else {
            info!("in-memory storage selected, no migrations to apply");
        }
        return Ok(());
    }

    let app_state = api_services::build_app_state(pool, &config);
    let app = api_router::build_router(app_state, &config)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, backend = config.storage_backend.name(), "crudbase-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
