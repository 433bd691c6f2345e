use axum::routing::{get, post};
use axum::Router;

use crate::server::api;
use crate::server::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(api::health))
        .route("/api/status", get(api::status))
        .route("/api/armies", get(api::armies))
        .route("/api/armies/:id", get(api::army))
        .route("/api/armies/:id/units", get(api::army_units))
        .route("/api/armies/:id/strategems", get(api::army_strategems))
        .route("/api/units/:name", get(api::unit))
        .route("/api/abilities/lookup", get(api::ability_lookup))
        .route("/api/cache/clear", post(api::clear_cache))
        .route("/api/scoreboard", get(api::scoreboard))
        .route("/api/scoreboard/reset", post(api::reset_scoreboard))
        .route("/api/scoreboard/:player/:category", post(api::adjust_score))
        .fallback(api::route_not_found)
        .with_state(state)
}
