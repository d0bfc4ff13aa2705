use axum::{Json, extract::State};
use std::sync::Arc;

use super::{
    ApiError,
    types::{SyncResponse, UpcomingMatchDto},
};
use crate::state::SharedState;

/// Upcoming matches, ordered by date ascending. Always live: the table is
/// kept fresh by the sync orchestrator, so reads bypass the cache entirely.
pub async fn list_upcoming(
    State(state): State<Arc<SharedState>>,
) -> Result<Json<Vec<UpcomingMatchDto>>, ApiError> {
    let rows = state
        .store
        .list_upcoming_matches()
        .await
        .map_err(ApiError::store)?;

    Ok(Json(rows.into_iter().map(UpcomingMatchDto::from).collect()))
}

/// Triggers a fetch-then-full-replace sync. Normally invoked by an external
/// cron; safe to re-trigger after a partial failure.
pub async fn sync_matches(
    State(state): State<Arc<SharedState>>,
) -> Result<Json<SyncResponse>, ApiError> {
    let updated = state.sync_service.sync_upcoming_matches().await?;

    Ok(Json(SyncResponse {
        status: "ok",
        updated,
    }))
}
