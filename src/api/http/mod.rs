// src/api/http/mod.rs
// HTTP router: the persona function plus health probes

pub mod health;
pub mod persona;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use health::{health_check, liveness_check};
pub use persona::{generate_persona, preflight};

/// Path prefix for callable functions; the gateway builds URLs the same way.
pub const FUNCTIONS_PREFIX: &str = "/functions/v1";

pub fn build_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            &format!("{FUNCTIONS_PREFIX}/generate-persona"),
            post(generate_persona).options(preflight),
        )
        .route("/health", get(health_check))
        .route("/live", get(liveness_check))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
