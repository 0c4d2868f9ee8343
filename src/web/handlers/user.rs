//! User handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::AppState;
use crate::web::dto::{RegisterRequest, UserResponse};
use crate::web::error::ApiError;
use crate::web::middleware::TokenHeader;

/// POST /users - Register a new user.
///
/// A missing or unparsable body is treated as empty, so it reports
/// `Missing email` like an absent field.
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Option<Json<RegisterRequest>>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let Json(req) = body.unwrap_or_default();
    let user = state
        .auth
        .register(
            req.email.as_deref().unwrap_or_default(),
            req.password.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users/me - The user the token belongs to.
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    token: TokenHeader,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.auth.get_self(token.as_deref()).await?;
    Ok(Json(user.into()))
}
