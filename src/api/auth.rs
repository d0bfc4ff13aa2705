use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::ApiError;
use crate::state::SharedState;

/// Single authorization predicate for the protected route set. Compares
/// `Authorization: Bearer <token>` against the configured secret and rejects
/// with 401 before any handler logic runs. With no token configured the
/// protected routes accept unauthenticated requests.
pub async fn require_token(
    State(state): State<Arc<SharedState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.config.server.api_token.as_deref() else {
        return Ok(next.run(request).await);
    };

    match bearer_token(&headers) {
        Some(token) if token == expected => Ok(next.run(request).await),
        _ => Err(ApiError::Unauthorized(
            "Missing or invalid bearer token".to_string(),
        )),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
}
