use std::env;

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "coffee_shop.db";
const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5050;

/// Errors raised while reading the server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a valid port number, got `{0}`")]
    InvalidPort(String),
}

/// Runtime configuration assembled from the process environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Bearer token granting the admin role. Admin calls are refused when unset.
    pub admin_token: Option<String>,
}

impl ServerConfig {
    /// Read `DATABASE_URL`, `ADDRESS`, `PORT` and `ADMIN_TOKEN`, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let address = env::var("ADDRESS").unwrap_or_else(|_| DEFAULT_ADDRESS.to_string());

        let port = match env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            Err(_) => DEFAULT_PORT,
        };

        let admin_token = env::var("ADMIN_TOKEN")
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        Ok(Self {
            database_url,
            address,
            port,
            admin_token,
        })
    }
}
