use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crudbase_application::DEFAULT_TOKEN_TTL_HOURS;
use crudbase_core::AppError;
use tracing_subscriber::EnvFilter;

/// Where definitions, items and users are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackendConfig {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    InMemory,
}

impl StorageBackendConfig {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Postgres { .. } => "postgres",
            Self::InMemory => "memory",
        }
    }
}

/// Allowed CORS origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOriginConfig {
    Any,
    Exact(String),
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub api_host: String,
    pub api_port: u16,
    pub storage_backend: StorageBackendConfig,
    pub cors_allowed_origin: CorsOriginConfig,
    pub auth_token_ttl_hours: i64,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = parse_env("API_PORT", 3000_u16)?;

        let storage_backend = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_owned())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "postgres" => StorageBackendConfig::Postgres {
                database_url: required_non_empty_env("DATABASE_URL")?,
                max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 10_u32)?,
            },
            "memory" => StorageBackendConfig::InMemory,
            other => {
                return Err(AppError::Validation(format!(
                    "STORAGE_BACKEND must be either 'postgres' or 'memory', got '{other}'"
                )));
            }
        };

        let cors_allowed_origin = match env::var("CORS_ALLOWED_ORIGIN")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
        {
            None => CorsOriginConfig::Any,
            Some(value) if value == "*" => CorsOriginConfig::Any,
            Some(value) => CorsOriginConfig::Exact(value),
        };

        let auth_token_ttl_hours = parse_env("AUTH_TOKEN_TTL_HOURS", DEFAULT_TOKEN_TTL_HOURS)?;
        if auth_token_ttl_hours <= 0 {
            return Err(AppError::Validation(
                "AUTH_TOKEN_TTL_HOURS must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            migrate_only,
            api_host,
            api_port,
            storage_backend,
            cors_allowed_origin,
            auth_token_ttl_hours,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_env<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name}: {error}"))),
        _ => Ok(default),
    }
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
