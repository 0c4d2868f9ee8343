//! API handlers.

pub mod app;
pub mod auth;
pub mod file;
pub mod user;

pub use app::*;
pub use auth::*;
pub use file::*;
pub use user::*;

use std::sync::Arc;

use crate::auth::AuthService;
use crate::file::FileTreeManager;
use crate::store::{MetadataStore, SessionStore};

/// Shared state of the HTTP handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Registration and token sessions.
    pub auth: AuthService,
    /// File tree operations.
    pub files: FileTreeManager,
    /// Metadata store, for status and stats.
    pub metadata: Arc<dyn MetadataStore>,
    /// Session store, for status.
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        auth: AuthService,
        files: FileTreeManager,
        metadata: Arc<dyn MetadataStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            auth,
            files,
            metadata,
            sessions,
        }
    }
}
