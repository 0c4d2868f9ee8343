//! Service status handlers.

use std::sync::Arc;

use axum::{extract::State, Json};

use super::AppState;
use crate::web::dto::{StatsResponse, StatusResponse};
use crate::web::error::ApiError;

/// GET /status - Liveness of the backing stores.
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        redis: state.sessions.is_alive().await,
        db: state.metadata.is_alive().await,
    })
}

/// GET /stats - Number of users and files.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, ApiError> {
    let users = state.metadata.count_users().await?;
    let files = state.metadata.count_files().await?;
    Ok(Json(StatsResponse { users, files }))
}
