use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::types::ErrorBody;
use crate::clients::FetchError;
use crate::services::{CalendarError, SyncError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    InvalidDate(String),

    Unauthorized(String),

    StoreError(String),

    FetchFailed(String),

    SyncPersistError(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::InvalidDate(msg) => write!(f, "Invalid date: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::StoreError(msg) => write!(f, "Store error: {}", msg),
            ApiError::FetchFailed(msg) => write!(f, "Fetch failed: {}", msg),
            ApiError::SyncPersistError(msg) => write!(f, "Sync persist error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // 500-mapped causes are logged server-side only; the client gets a
        // safe generic message.
        let (status, error_message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::InvalidDate(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ApiError::StoreError(msg) => {
                tracing::error!("Store error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            ApiError::FetchFailed(msg) => {
                tracing::error!("Fetch failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch upstream data".to_string(),
                )
            }
            ApiError::SyncPersistError(msg) => {
                tracing::error!("Sync persist error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to persist synced data".to_string(),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorBody::new(error_message))).into_response()
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        ApiError::FetchFailed(err.to_string())
    }
}

impl From<SyncError> for ApiError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::Fetch(e) => ApiError::FetchFailed(e.to_string()),
            SyncError::Persist(e) => ApiError::SyncPersistError(e.to_string()),
        }
    }
}

impl From<CalendarError> for ApiError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::MatchNotFound(id) => ApiError::not_found("Match", id),
            CalendarError::InvalidDate { .. } => {
                ApiError::InvalidDate("Match date cannot be parsed".to_string())
            }
        }
    }
}

impl ApiError {
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        ApiError::NotFound(format!("{} {} not found", resource, id))
    }

    pub fn player_not_found(identifier: &str) -> Self {
        ApiError::NotFound(format!("Player '{}' not found", identifier))
    }

    pub fn store(err: anyhow::Error) -> Self {
        ApiError::StoreError(err.to_string())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::InternalError(msg.into())
    }
}
