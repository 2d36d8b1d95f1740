pub mod api;
pub mod config;
pub mod error;
pub mod health;
pub mod round_store;
pub mod state;

use std::time::Duration;

use axum::Router;
use axum::routing::{get, post, put};

use config::ServerConfig;
use state::AppState;

/// Build the Axum router and application state from a config.
pub fn build_app(config: ServerConfig) -> (Router<()>, AppState) {
    let state = AppState::new(config);

    let api_routes = Router::new()
        .route("/handicap/course", post(api::course_handicap))
        .route("/handicap/hole", post(api::hole_allowance))
        .route("/banker/settle", post(api::settle_matchup))
        .route("/games", get(api::list_games))
        .route("/rounds", post(api::create_round))
        .route(
            "/rounds/{round_id}",
            get(api::get_round).delete(api::delete_round),
        )
        .route(
            "/rounds/{round_id}/holes/{hole}",
            put(api::record_hole).delete(api::clear_hole),
        );

    let app = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes)
        .with_state(state.clone());

    (app, state)
}

/// Background task that drops rounds nobody has touched within the idle timeout.
pub fn spawn_idle_reaper(state: AppState) {
    let timeout = Duration::from_secs(state.config.rounds.idle_timeout_secs);
    let every = Duration::from_secs(state.config.rounds.idle_check_interval_secs);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let removed = state.rounds.write().await.cleanup_idle_rounds(timeout);
            if removed > 0 {
                tracing::info!(removed, "Removed idle rounds");
            }
        }
    });
}
