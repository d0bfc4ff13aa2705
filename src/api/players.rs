use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;
use std::sync::Arc;

use super::{ApiError, types::PlayerDto};
use crate::constants::{CACHE_KEY_PLAYERS, CACHE_PREFIX_PLAYER, CACHE_PREFIX_PLAYERS_YEAR};
use crate::state::SharedState;

/// Full roster. Cached until an explicit clear.
pub async fn list_players(State(state): State<Arc<SharedState>>) -> Result<Json<Value>, ApiError> {
    if let Some(cached) = state.cache.get(CACHE_KEY_PLAYERS).await {
        return Ok(Json(cached));
    }

    let rows = state.store.list_players().await.map_err(ApiError::store)?;
    let dtos: Vec<PlayerDto> = rows.into_iter().map(PlayerDto::from).collect();
    let value = serde_json::to_value(dtos).map_err(|e| ApiError::internal(e.to_string()))?;

    state.cache.put(CACHE_KEY_PLAYERS, value.clone()).await;
    Ok(Json(value))
}

/// Single player by numeric id or nickname. A miss responds 404 and caches
/// nothing for that key.
pub async fn get_player(
    State(state): State<Arc<SharedState>>,
    Path(identifier): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let key = format!("{CACHE_PREFIX_PLAYER}{identifier}");
    if let Some(cached) = state.cache.get(&key).await {
        return Ok(Json(cached));
    }

    let row = state
        .store
        .get_player(&identifier)
        .await
        .map_err(ApiError::store)?
        .ok_or_else(|| ApiError::player_not_found(&identifier))?;

    let value = serde_json::to_value(PlayerDto::from(row))
        .map_err(|e| ApiError::internal(e.to_string()))?;

    state.cache.put(&key, value.clone()).await;
    Ok(Json(value))
}

/// Players active in the given season. An unknown year yields an empty
/// array, not an error.
pub async fn list_players_by_year(
    State(state): State<Arc<SharedState>>,
    Path(year): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let key = format!("{CACHE_PREFIX_PLAYERS_YEAR}{year}");
    if let Some(cached) = state.cache.get(&key).await {
        return Ok(Json(cached));
    }

    let rows = state
        .store
        .list_players_by_year(&year)
        .await
        .map_err(ApiError::store)?;
    let dtos: Vec<PlayerDto> = rows.into_iter().map(PlayerDto::from).collect();
    let value = serde_json::to_value(dtos).map_err(|e| ApiError::internal(e.to_string()))?;

    state.cache.put(&key, value.clone()).await;
    Ok(Json(value))
}
