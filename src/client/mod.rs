// src/client/mod.rs
// Typed gateway for calling remote functions with the current session's bearer token

pub mod session;

use std::time::Duration;

use anyhow::Result;
use reqwest::{header, Client as ReqwestClient, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::api::http::FUNCTIONS_PREFIX;
use crate::config::GatewayConfig;
use crate::persona::{Persona, PersonaRequest, PersonaResponse};

pub use session::Session;

const FALLBACK_REMOTE_ERROR: &str = "Edge function call failed";

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("No active session")]
    Unauthenticated,

    #[error("{message}")]
    Remote { status: StatusCode, message: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

pub struct DataGateway {
    client: ReqwestClient,
    config: GatewayConfig,
    session: RwLock<Option<Session>>,
}

impl DataGateway {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        info!("Initializing data gateway: base_url={}", config.base_url);

        let client = ReqwestClient::builder()
            .timeout(config.timeout())
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            client,
            config,
            session: RwLock::new(None),
        })
    }

    pub async fn set_session(&self, session: Session) {
        *self.session.write().await = Some(session);
    }

    pub async fn clear_session(&self) {
        *self.session.write().await = None;
    }

    /// The stored session, unless it is missing or expired.
    pub async fn current_session(&self) -> Option<Session> {
        self.session
            .read()
            .await
            .as_ref()
            .filter(|s| !s.is_expired())
            .cloned()
    }

    pub fn function_url(&self, name: &str) -> String {
        format!(
            "{}{}/{}",
            self.config.base_url.trim_end_matches('/'),
            FUNCTIONS_PREFIX,
            name
        )
    }

    /// POST `payload` to the named function and return its JSON body.
    pub async fn invoke<P: Serialize + ?Sized>(
        &self,
        name: &str,
        payload: &P,
    ) -> Result<Value, GatewayError> {
        let session = self
            .current_session()
            .await
            .ok_or(GatewayError::Unauthenticated)?;

        let url = self.function_url(name);
        debug!("Invoking {}", url);

        let mut request = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", session.access_token))
            .json(payload);
        if let Some(key) = &self.config.anon_key {
            request = request.header("apikey", key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            // Error bodies are best-effort; fall back to a generic message.
            let body: Option<Value> = response.json().await.ok();
            let message = body
                .as_ref()
                .and_then(|b| b.get("error"))
                .and_then(Value::as_str)
                .unwrap_or(FALLBACK_REMOTE_ERROR)
                .to_string();
            warn!("Function {} failed with {}: {}", name, status, message);
            return Err(GatewayError::Remote { status, message });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }

    pub async fn generate_persona(&self, request: &PersonaRequest) -> Result<Persona, GatewayError> {
        let body = self.invoke("generate-persona", request).await?;
        let response: PersonaResponse =
            serde_json::from_value(body).map_err(|e| GatewayError::Decode(e.to_string()))?;
        Ok(response.persona)
    }
}
