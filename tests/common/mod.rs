// tests/common/mod.rs
// Shared test utilities: a counting in-memory store and token helpers

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use futureself::auth::{create_token, Credential, JwtSessionVerifier};
use futureself::persona::{NewPersona, Persona, PersonaRequest, PersonaService, PersonaStore, Timeframe};
use futureself::AppState;

pub const SECRET: &str = "test-jwt-secret";
pub const AUDIENCE: &str = "authenticated";

/// In-memory store that records every insert attempt.
#[derive(Default)]
pub struct FakeStore {
    rows: Mutex<Vec<Persona>>,
    attempts: AtomicUsize,
    fail_with: Option<String>,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A store whose inserts always fail with `message`.
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn insert_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn rows(&self) -> Vec<Persona> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl PersonaStore for FakeStore {
    async fn insert(&self, persona: NewPersona) -> Result<Persona> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fail_with {
            bail!("{}", message);
        }

        let now = Utc::now();
        let mut rows = self.rows.lock().unwrap();
        let stored = Persona {
            id: format!("persona-{}", rows.len() + 1),
            user_id: persona.user_id,
            timeframe: persona.timeframe,
            system_prompt: persona.system_prompt,
            personality_summary: persona.personality_summary,
            communication_style: persona.communication_style,
            achievements: persona.achievements,
            created_at: now,
            last_updated: now,
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn ping(&self) -> Result<()> {
        if self.fail_with.is_some() {
            bail!("store offline");
        }
        Ok(())
    }
}

pub fn verifier() -> Arc<JwtSessionVerifier> {
    Arc::new(JwtSessionVerifier::new(SECRET, AUDIENCE))
}

pub fn service(store: Arc<FakeStore>) -> PersonaService {
    PersonaService::new(store, verifier())
}

pub fn app_state(store: Arc<FakeStore>) -> Arc<AppState> {
    Arc::new(AppState::new(store, verifier()))
}

pub fn token_for(user_id: &str) -> String {
    create_token(SECRET, AUDIENCE, user_id, None, chrono::Duration::hours(1)).unwrap()
}

pub fn credential_for(user_id: &str) -> Credential {
    Credential::new(token_for(user_id))
}

/// The end-to-end scenario request.
pub fn sample_request() -> PersonaRequest {
    PersonaRequest {
        user_id: "u1".to_string(),
        timeframe: Timeframe::TenYears,
        goals: vec!["financial freedom".to_string()],
        values: vec!["integrity".to_string()],
        communication_style: json!({ "tone": "warm" }).into(),
    }
}
