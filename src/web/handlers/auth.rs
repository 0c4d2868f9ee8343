//! Session handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};

use super::AppState;
use crate::web::dto::TokenResponse;
use crate::web::error::ApiError;
use crate::web::middleware::TokenHeader;

/// GET /connect - Exchange Basic credentials for a session token.
pub async fn connect(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let token = state.auth.login(authorization).await?;
    Ok(Json(TokenResponse { token }))
}

/// GET /disconnect - Revoke the session token.
pub async fn disconnect(
    State(state): State<Arc<AppState>>,
    token: TokenHeader,
) -> Result<StatusCode, ApiError> {
    state.auth.logout(token.as_deref()).await?;
    Ok(StatusCode::NO_CONTENT)
}
