// src/state.rs
// Shared handles for request handlers, built once at startup

use std::sync::Arc;

use crate::auth::SessionVerifier;
use crate::persona::{PersonaService, PersonaStore};

#[derive(Clone)]
pub struct AppState {
    pub persona_service: PersonaService,
}

impl AppState {
    pub fn new(store: Arc<dyn PersonaStore>, verifier: Arc<dyn SessionVerifier>) -> Self {
        Self {
            persona_service: PersonaService::new(store, verifier),
        }
    }
}
