/// Health check for the local server
use crate::config::StorageBackend;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub storage: StorageBackend,
}

/// GET /health
///
/// Does not touch the store; `storage` names the configured backend only.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "roster",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.backend,
    })
}
