use axum::{Json, extract::State};
use serde_json::Value;
use std::sync::Arc;

use super::{ApiError, types::YearDto};
use crate::constants::CACHE_KEY_YEARS;
use crate::state::SharedState;

/// Competitive seasons. Reference data: cached until an explicit clear.
pub async fn list_years(State(state): State<Arc<SharedState>>) -> Result<Json<Value>, ApiError> {
    if let Some(cached) = state.cache.get(CACHE_KEY_YEARS).await {
        return Ok(Json(cached));
    }

    let rows = state.store.list_years().await.map_err(ApiError::store)?;
    let dtos: Vec<YearDto> = rows.into_iter().map(YearDto::from).collect();
    let value = serde_json::to_value(dtos).map_err(|e| ApiError::internal(e.to_string()))?;

    state.cache.put(CACHE_KEY_YEARS, value.clone()).await;
    Ok(Json(value))
}
