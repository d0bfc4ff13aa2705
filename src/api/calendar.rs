use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;

use super::ApiError;
use crate::services::calendar::{build_event, find_match};
use crate::state::SharedState;

/// Serves one match as a `text/calendar` attachment with a one-hour event
/// window. Either a complete document or a JSON error, never a partial body.
pub async fn get_calendar(
    State(state): State<Arc<SharedState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let matches = state
        .store
        .list_upcoming_matches()
        .await
        .map_err(ApiError::store)?;

    let m = find_match(&matches, &id).ok_or_else(|| ApiError::not_found("Match", &id))?;
    let document = build_event(m)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"match-{id}.ics\""),
            ),
        ],
        document,
    ))
}
