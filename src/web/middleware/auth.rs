//! Token authentication extractors.

use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "x-token";

/// Raw `X-Token` header value, if any.
#[derive(Debug, Clone)]
pub struct TokenHeader(pub Option<String>);

impl TokenHeader {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

fn token_from_parts(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl<S> FromRequestParts<S> for TokenHeader
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(TokenHeader(token_from_parts(parts)))
    }
}

/// Extractor for authenticated users.
///
/// Rejects with 401 when the token is missing, unknown or expired.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_parts(parts).ok_or_else(ApiError::unauthorized)?;
        let user_id = state
            .auth
            .resolve_token(Some(&token))
            .await?
            .ok_or_else(|| {
                tracing::debug!("Unknown or expired token");
                ApiError::unauthorized()
            })?;

        Ok(AuthUser { user_id, token })
    }
}

/// Optional authentication extractor.
///
/// Never rejects: a missing or invalid token yields an anonymous caller.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<String>);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for OptionalAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = token_from_parts(parts) else {
            return Ok(OptionalAuthUser(None));
        };

        match state.auth.resolve_token(Some(&token)).await {
            Ok(user_id) => Ok(OptionalAuthUser(user_id)),
            Err(e) => {
                tracing::warn!("Token lookup failed, treating caller as anonymous: {}", e);
                Ok(OptionalAuthUser(None))
            }
        }
    }
}
