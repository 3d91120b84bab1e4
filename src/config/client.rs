// src/config/client.rs
// Remote function gateway configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::helpers::{env_opt, env_or, env_parsed_or};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Project base URL; functions live under `/functions/v1/`.
    pub base_url: String,
    /// Public project key, sent as the `apikey` header when set.
    pub anon_key: Option<String>,
    pub timeout_secs: u64,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: env_or("FUTURESELF_URL", "http://127.0.0.1:54321"),
            anon_key: env_opt("FUTURESELF_ANON_KEY"),
            timeout_secs: env_parsed_or("FUTURESELF_GATEWAY_TIMEOUT", 30)?,
        })
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: None,
            timeout_secs: 30,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
