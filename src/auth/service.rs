//! Account registration and token sessions.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::credentials::BasicCredentials;
use super::password::{hash_password, verify_password, PasswordScheme};
use crate::db::{NewUser, User};
use crate::store::{MetadataStore, SessionStore};
use crate::{FileboxError, Result};

/// Default session lifetime (24 hours).
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Session store key for a token.
pub fn session_key(token: &str) -> String {
    format!("session:{token}")
}

/// Registers users and manages their session tokens.
#[derive(Debug, Clone)]
pub struct AuthService {
    metadata: Arc<dyn MetadataStore>,
    sessions: Arc<dyn SessionStore>,
    scheme: PasswordScheme,
    session_ttl: Duration,
}

impl AuthService {
    /// Create a service hashing with SHA-1 and issuing 24 hour sessions.
    pub fn new(metadata: Arc<dyn MetadataStore>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            metadata,
            sessions,
            scheme: PasswordScheme::default(),
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }

    /// Set the scheme used for new passwords.
    pub fn with_scheme(mut self, scheme: PasswordScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Set the session lifetime.
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Register a new user.
    ///
    /// Fails with `Validation` when email or password is empty and with
    /// `Conflict` when the email is taken.
    pub async fn register(&self, email: &str, password: &str) -> Result<User> {
        if email.is_empty() {
            return Err(FileboxError::Validation("Missing email".to_string()));
        }
        if password.is_empty() {
            return Err(FileboxError::Validation("Missing password".to_string()));
        }

        if self.metadata.find_user_by_email(email).await?.is_some() {
            debug!(email, "Registration rejected: email taken");
            return Err(FileboxError::Conflict("Already exist".to_string()));
        }

        let hash = hash_password(password, self.scheme)
            .map_err(|e| FileboxError::Auth(e.to_string()))?;
        let user = self
            .metadata
            .insert_user(&NewUser::new(email, hash))
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Log in with an `Authorization: Basic` header value and return a new token.
    pub async fn login(&self, authorization: Option<&str>) -> Result<String> {
        let header =
            authorization.ok_or_else(|| FileboxError::Auth("missing credentials".to_string()))?;
        let creds = BasicCredentials::from_header(header)?;

        let user = self
            .metadata
            .find_user_by_email(&creds.email)
            .await?
            .ok_or_else(|| FileboxError::Auth("unknown user".to_string()))?;

        if verify_password(&creds.password, &user.password).is_err() {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(FileboxError::Auth("invalid credentials".to_string()));
        }

        let token = Uuid::new_v4().to_string();
        self.sessions
            .set(&session_key(&token), &user.id, self.session_ttl)
            .await?;

        info!(user_id = %user.id, "User logged in");
        Ok(token)
    }

    /// Revoke a token.
    pub async fn logout(&self, token: Option<&str>) -> Result<()> {
        let token = token.ok_or_else(|| FileboxError::Auth("missing token".to_string()))?;
        let user_id = self
            .resolve_token(Some(token))
            .await?
            .ok_or_else(|| FileboxError::Auth("invalid token".to_string()))?;

        self.sessions.del(&session_key(token)).await?;

        info!(user_id = %user_id, "User logged out");
        Ok(())
    }

    /// Resolve a token to a user ID.
    ///
    /// Missing, unknown and expired tokens yield `Ok(None)`.
    pub async fn resolve_token(&self, token: Option<&str>) -> Result<Option<String>> {
        match token {
            Some(token) if !token.is_empty() => self.sessions.get(&session_key(token)).await,
            _ => Ok(None),
        }
    }

    /// The user a token belongs to.
    pub async fn get_self(&self, token: Option<&str>) -> Result<User> {
        let user_id = self
            .resolve_token(token)
            .await?
            .ok_or_else(|| FileboxError::Auth("invalid token".to_string()))?;

        self.metadata
            .find_user_by_id(&user_id)
            .await?
            .ok_or_else(|| FileboxError::Auth("unknown user".to_string()))
    }
}
