// src/auth/mod.rs
// Bearer credentials and the session verifier seam

pub mod jwt;

use async_trait::async_trait;

pub use jwt::{create_token, Claims, JwtSessionVerifier};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing authorization header")]
    MissingCredential,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Failed to create token: {0}")]
    TokenCreation(String),
}

/// Bearer token presented by a caller.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Parse an `Authorization` header value. Only the `Bearer` scheme is accepted.
    pub fn from_authorization_header(value: &str) -> Option<Self> {
        let (scheme, token) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        Some(Self(token.to_string()))
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

// Tokens stay out of logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Checks a credential against whatever issues sessions.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    async fn verify(&self, credential: &Credential) -> Result<Claims, AuthError>;
}
