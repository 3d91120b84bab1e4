// src/persona/mod.rs
// Future-self personas: request/record types, prompt templates, storage and the service

pub mod service;
pub mod store;
pub mod template;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use service::{PersonaError, PersonaService};
pub use store::{PersonaStore, SqlitePersonaStore};
pub use template::{
    generate_personality_summary, generate_system_prompt, render, RenderedPersona,
};

/// Horizon the persona speaks from.
///
/// Unrecognized tokens are kept as `Other` so the stored row echoes what the
/// caller sent. They render with the ten-year label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Timeframe {
    FiveYears,
    TenYears,
    Other(String),
}

impl Timeframe {
    pub const FALLBACK_LABEL: &'static str = "10 years";

    /// Wire token, e.g. `5_years`.
    pub fn token(&self) -> &str {
        match self {
            Timeframe::FiveYears => "5_years",
            Timeframe::TenYears => "10_years",
            Timeframe::Other(token) => token,
        }
    }

    /// Human-readable label interpolated into the templates.
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::FiveYears => "5 years",
            Timeframe::TenYears => "10 years",
            Timeframe::Other(_) => Self::FALLBACK_LABEL,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Timeframe::Other(token) if token.trim().is_empty())
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Timeframe::Other(String::new())
    }
}

impl From<String> for Timeframe {
    fn from(token: String) -> Self {
        match token.as_str() {
            "5_years" => Timeframe::FiveYears,
            "10_years" => Timeframe::TenYears,
            _ => Timeframe::Other(token),
        }
    }
}

impl From<&str> for Timeframe {
    fn from(token: &str) -> Self {
        Timeframe::from(token.to_string())
    }
}

impl From<Timeframe> for String {
    fn from(timeframe: Timeframe) -> Self {
        match timeframe {
            Timeframe::Other(token) => token,
            known => known.token().to_string(),
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Free-form tone/preference data. Never inspected, only echoed into the
/// system prompt and stored alongside the persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommunicationStyle(pub Value);

impl CommunicationStyle {
    /// Compact JSON, stable for a given value.
    pub fn to_prompt_string(&self) -> String {
        self.0.to_string()
    }
}

impl Default for CommunicationStyle {
    fn default() -> Self {
        CommunicationStyle(Value::Object(serde_json::Map::new()))
    }
}

impl From<Value> for CommunicationStyle {
    fn from(value: Value) -> Self {
        CommunicationStyle(value)
    }
}

/// Body of the generate-persona function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub timeframe: Timeframe,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub communication_style: CommunicationStyle,
}

impl PersonaRequest {
    pub fn validate(&self) -> Result<(), PersonaError> {
        if self.user_id.trim().is_empty() {
            return Err(PersonaError::InvalidRequest(
                "Missing required field: userId".to_string(),
            ));
        }
        if self.timeframe.is_missing() {
            return Err(PersonaError::InvalidRequest(
                "Missing required field: timeframe".to_string(),
            ));
        }
        Ok(())
    }
}

/// Persona as handed to the store, before id and timestamps exist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPersona {
    pub user_id: String,
    pub timeframe: Timeframe,
    pub system_prompt: String,
    pub personality_summary: String,
    pub communication_style: CommunicationStyle,
    pub achievements: Vec<String>,
}

/// Stored persona row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub id: String,
    pub user_id: String,
    pub timeframe: Timeframe,
    pub system_prompt: String,
    pub personality_summary: String,
    pub communication_style: CommunicationStyle,
    pub achievements: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// Success body of the generate-persona function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaResponse {
    pub persona: Persona,
}
