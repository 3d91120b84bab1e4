// src/persona/service.rs
// Persona creation: credential check, validation, templating, one insert

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::template::render;
use super::{NewPersona, Persona, PersonaRequest, PersonaStore};
use crate::auth::{AuthError, Credential, SessionVerifier};

#[derive(Debug, thiserror::Error)]
pub enum PersonaError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    StorageError(String),
}

/// Creates personas. Store and verifier are injected once at startup and
/// shared across requests.
#[derive(Clone)]
pub struct PersonaService {
    store: Arc<dyn PersonaStore>,
    verifier: Arc<dyn SessionVerifier>,
}

impl PersonaService {
    pub fn new(store: Arc<dyn PersonaStore>, verifier: Arc<dyn SessionVerifier>) -> Self {
        Self { store, verifier }
    }

    pub fn store(&self) -> &Arc<dyn PersonaStore> {
        &self.store
    }

    /// Generate and persist a persona for the authenticated caller.
    ///
    /// Every failure happens before the insert except `StorageError`, which
    /// is the insert itself failing. Nothing is retried.
    pub async fn create_persona(
        &self,
        request: PersonaRequest,
        credential: Option<&Credential>,
    ) -> Result<Persona, PersonaError> {
        let credential = credential
            .ok_or_else(|| PersonaError::Unauthorized(AuthError::MissingCredential.to_string()))?;

        let claims = self.verifier.verify(credential).await.map_err(|e| {
            warn!("Rejected credential: {}", e);
            PersonaError::Unauthorized(e.to_string())
        })?;

        request.validate()?;

        // Callers may only create personas for themselves.
        if claims.sub != request.user_id {
            warn!(
                "Credential subject {} does not match requested user {}",
                claims.sub, request.user_id
            );
            return Err(PersonaError::Unauthorized(
                "Credential does not match userId".to_string(),
            ));
        }

        let rendered = render(&request);
        debug!(
            "Rendered persona for {} ({} goals, {} values)",
            request.user_id,
            request.goals.len(),
            request.values.len()
        );

        let new_persona = NewPersona {
            user_id: request.user_id,
            timeframe: request.timeframe,
            system_prompt: rendered.system_prompt,
            personality_summary: rendered.personality_summary,
            communication_style: request.communication_style,
            achievements: Vec::new(),
        };

        let persona = self.store.insert(new_persona).await.map_err(|e| {
            error!("Persona insert failed: {:#}", e);
            PersonaError::StorageError(format!("{e:#}"))
        })?;

        info!("Created persona {} for user {}", persona.id, persona.user_id);
        Ok(persona)
    }
}
