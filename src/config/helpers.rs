// src/config/helpers.rs
// Helper functions for loading environment variables

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

pub fn require_env(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("Missing required env var: {key}"))
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse `key` if set. Unset falls back to `default`; a value that does not
/// parse is an error rather than a silent default.
pub fn env_parsed_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => {
            // Allow trailing comments in .env values
            let clean = raw.split('#').next().unwrap_or("").trim();
            clean
                .parse()
                .map_err(|e| anyhow::anyhow!("Failed to parse {key}='{clean}': {e}"))
        }
        Err(_) => Ok(default),
    }
}
