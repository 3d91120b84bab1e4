// src/auth/jwt.rs

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::{AuthError, Credential, SessionVerifier};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // user_id
    pub aud: String,
    pub exp: usize,         // expiration timestamp
    pub iat: usize,         // issued at timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

pub fn create_token(
    secret: &str,
    audience: &str,
    user_id: &str,
    email: Option<&str>,
    ttl: Duration,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(ttl)
        .ok_or_else(|| AuthError::TokenCreation("Failed to calculate expiration".to_string()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        aud: audience.to_string(),
        exp: expiration,
        iat: now.timestamp() as usize,
        email: email.map(str::to_string),
        role: Some("authenticated".to_string()),
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key).map_err(|e| AuthError::TokenCreation(e.to_string()))
}

/// Verifies HS256 session tokens signed with the shared project secret.
pub struct JwtSessionVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtSessionVerifier {
    pub fn new(secret: &str, audience: &str) -> Self {
        let mut validation = Validation::default();
        validation.set_audience(&[audience]);

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl SessionVerifier for JwtSessionVerifier {
    async fn verify(&self, credential: &Credential) -> Result<Claims, AuthError> {
        decode::<Claims>(credential.token(), &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";
    const AUD: &str = "authenticated";

    #[tokio::test]
    async fn test_verify_issued_token() {
        let token = create_token(SECRET, AUD, "u1", Some("u1@example.com"), Duration::hours(1)).unwrap();
        let verifier = JwtSessionVerifier::new(SECRET, AUD);

        let claims = verifier.verify(&Credential::new(token)).await.unwrap();
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.email.as_deref(), Some("u1@example.com"));
    }

    #[tokio::test]
    async fn test_reject_wrong_secret() {
        let token = create_token("other-secret", AUD, "u1", None, Duration::hours(1)).unwrap();
        let verifier = JwtSessionVerifier::new(SECRET, AUD);

        let err = verifier.verify(&Credential::new(token)).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn test_reject_expired_token() {
        // Past the default 60s leeway.
        let token = create_token(SECRET, AUD, "u1", None, Duration::hours(-2)).unwrap();
        let verifier = JwtSessionVerifier::new(SECRET, AUD);

        assert!(verifier.verify(&Credential::new(token)).await.is_err());
    }

    #[tokio::test]
    async fn test_reject_wrong_audience() {
        let token = create_token(SECRET, "anon", "u1", None, Duration::hours(1)).unwrap();
        let verifier = JwtSessionVerifier::new(SECRET, AUD);

        assert!(verifier.verify(&Credential::new(token)).await.is_err());
    }
}
