use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

pub mod auth;
pub mod calendar;
mod error;
pub mod matches;
pub mod players;
pub mod ranking;
pub mod system;
mod types;
pub mod years;

pub use error::ApiError;
pub use types::*;

pub fn router(state: Arc<SharedState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let protected_routes = Router::new()
        .route("/matches/sync", post(matches::sync_matches))
        .route("/cache/clear", post(system::clear_cache))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_token,
        ));

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/health", get(system::health))
        .route("/years", get(years::list_years))
        .route("/players", get(players::list_players))
        .route("/players/year/{year}", get(players::list_players_by_year))
        .route("/players/{identifier}", get(players::get_player))
        .route("/ranking", get(ranking::get_ranking))
        .route("/matches/upcoming", get(matches::list_upcoming))
        .route("/calendar/{id}", get(calendar::get_calendar))
        .merge(protected_routes)
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
