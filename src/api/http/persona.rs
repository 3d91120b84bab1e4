// src/api/http/persona.rs

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::auth::{AuthError, Credential};
use crate::persona::{PersonaRequest, PersonaResponse};
use crate::state::AppState;

/// POST /functions/v1/generate-persona
///
/// The bearer credential is checked before the body is looked at.
pub async fn generate_persona(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<PersonaRequest>, JsonRejection>,
) -> ApiResult<Json<PersonaResponse>> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized(AuthError::MissingCredential.to_string()))?;
    let credential = header
        .to_str()
        .ok()
        .and_then(Credential::from_authorization_header)
        .ok_or_else(|| ApiError::unauthorized("Malformed authorization header"))?;

    let Json(request) = body.map_err(|e| {
        debug!("Rejected persona body: {}", e);
        ApiError::bad_request(e.body_text())
    })?;

    let persona = state
        .persona_service
        .create_persona(request, Some(&credential))
        .await?;

    Ok(Json(PersonaResponse { persona }))
}

/// OPTIONS /functions/v1/generate-persona
pub async fn preflight() -> impl IntoResponse {
    StatusCode::OK
}
