use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Structured health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub rounds: RoundInfo,
}

#[derive(Serialize)]
pub struct RoundInfo {
    pub active: usize,
    pub capacity: usize,
}

/// Health check endpoint. Returns server status and round counts as JSON.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let active = state.rounds.read().await.len();
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        rounds: RoundInfo {
            active,
            capacity: state.config.limits.max_rounds,
        },
    })
}
