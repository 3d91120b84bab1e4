// src/config/mod.rs
// Application configuration, loaded once at startup and passed down explicitly

pub mod client;
pub mod helpers;
pub mod server;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub use client::GatewayConfig;
pub use server::{AuthConfig, DatabaseConfig, LoggingConfig, ServerConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub gateway: GatewayConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        // Don't fail if .env doesn't exist (for production)
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env(),
            logging: LoggingConfig::from_env(),
            gateway: GatewayConfig::from_env()?,
        })
    }
}
