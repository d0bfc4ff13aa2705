use axum::{Json, extract::State};
use serde_json::Value;
use std::sync::Arc;

use super::{ApiError, types::RankingEntryDto};
use crate::constants::CACHE_KEY_RANKING;
use crate::state::SharedState;

/// Scraped SoloQ ranking. Volatile: served from cache while younger than the
/// configured TTL, re-fetched otherwise. Concurrent misses may both fetch;
/// `put` is last-write-wins so over-fetching wastes work but corrupts nothing.
pub async fn get_ranking(State(state): State<Arc<SharedState>>) -> Result<Json<Value>, ApiError> {
    let ttl = state.config.ranking_ttl();
    if let Some(cached) = state.cache.get_if_fresh(CACHE_KEY_RANKING, ttl).await {
        return Ok(Json(cached));
    }

    let entries = state.ranking.fetch_ranking().await?;
    let dtos: Vec<RankingEntryDto> = entries.into_iter().map(RankingEntryDto::from).collect();
    let value = serde_json::to_value(dtos).map_err(|e| ApiError::internal(e.to_string()))?;

    state.cache.put(CACHE_KEY_RANKING, value.clone()).await;
    Ok(Json(value))
}
