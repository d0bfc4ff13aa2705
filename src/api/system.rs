use axum::{Json, extract::State};
use std::sync::Arc;

use super::types::{HealthResponse, MessageResponse};
use crate::state::SharedState;

/// Liveness plus a store reachability probe. Always 200; a broken store
/// shows up in the `database` field, not the status code.
pub async fn health(State(state): State<Arc<SharedState>>) -> Json<HealthResponse> {
    let database = if state.store.ping().await.is_ok() {
        "ok"
    } else {
        "unavailable"
    };

    Json(HealthResponse {
        status: "ok",
        database,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Drops every cached entry; the next read of each resource goes back to the
/// store or the remote source.
pub async fn clear_cache(State(state): State<Arc<SharedState>>) -> Json<MessageResponse> {
    state.cache.clear().await;

    Json(MessageResponse {
        message: "Cache cleared".to_string(),
    })
}
