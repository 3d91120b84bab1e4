// src/config/server.rs
// Server, database, auth and logging configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::Level;

use super::helpers::{env_opt, env_or, env_parsed_or};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env_or("FUTURESELF_HOST", "127.0.0.1"),
            port: env_parsed_or("FUTURESELF_PORT", 54321)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            url: env_or("DATABASE_URL", "sqlite:./futureself.db?mode=rwc"),
            max_connections: env_parsed_or("FUTURESELF_SQLITE_MAX_CONNECTIONS", 5)?,
        })
    }
}

/// Session token verification
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 secret. Only `serve` and `token` need it.
    pub jwt_secret: Option<String>,
    pub audience: String,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: env_opt("JWT_SECRET"),
            audience: env_or("JWT_AUDIENCE", "authenticated"),
        }
    }

    pub fn require_secret(&self) -> Result<&str> {
        self.jwt_secret
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Missing required env var: JWT_SECRET"))
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "***"))
            .field("audience", &self.audience)
            .finish()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            level: env_or("FUTURESELF_LOG_LEVEL", "info"),
        }
    }

    /// Unknown level names fall back to INFO.
    pub fn max_level(&self) -> Level {
        self.level.parse().unwrap_or(Level::INFO)
    }
}
