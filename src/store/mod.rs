//! Storage seams for Filebox.
//!
//! The auth and file layers talk to their persistence through two traits:
//! - [`MetadataStore`]: users and file/folder nodes
//! - [`SessionStore`]: expiring key/value entries mapping tokens to users
//!
//! Both are used as `Arc<dyn ...>` so backends can be swapped by configuration.

mod memory;
mod sqlite;

pub use memory::MemorySessionStore;
pub use sqlite::DatabaseSessionStore;

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::db::{NewUser, User};
use crate::file::{NewNode, Node, ParentId};
use crate::Result;

/// Document-style store for users and nodes.
#[async_trait]
pub trait MetadataStore: Send + Sync + Debug {
    /// Whether the store currently answers queries.
    async fn is_alive(&self) -> bool;

    /// Number of registered users.
    async fn count_users(&self) -> Result<i64>;

    /// Number of stored nodes.
    async fn count_files(&self) -> Result<i64>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Insert a user. A taken email fails with `Conflict`.
    async fn insert_user(&self, user: &NewUser) -> Result<User>;

    /// Find a node by ID regardless of owner.
    async fn find_node(&self, id: &str) -> Result<Option<Node>>;

    /// Find a node by ID only if `owner` owns it.
    async fn find_owned_node(&self, owner: &str, id: &str) -> Result<Option<Node>>;

    async fn insert_node(&self, node: &NewNode) -> Result<Node>;

    /// Owner's nodes directly under `parent`, in insertion order.
    async fn list_children(
        &self,
        owner: &str,
        parent: &ParentId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Node>>;

    /// Atomically set `is_public` on an owned node.
    async fn set_public(&self, owner: &str, id: &str, value: bool) -> Result<Option<Node>>;
}

/// Key/value cache with expiring keys.
#[async_trait]
pub trait SessionStore: Send + Sync + Debug {
    /// Whether the store currently answers requests.
    async fn is_alive(&self) -> bool;

    /// Set `key` to `value`, expiring after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Get the live value of `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Delete `key`. Returns true if it existed.
    async fn del(&self, key: &str) -> Result<bool>;

    /// Drop expired entries and return how many were removed.
    async fn purge_expired(&self) -> Result<u64>;
}

/// Spawn a task that periodically purges expired sessions.
pub fn spawn_session_cleanup(store: Arc<dyn SessionStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match store.purge_expired().await {
                Ok(0) => debug!("No expired sessions to purge"),
                Ok(count) => info!(count, "Purged expired sessions"),
                Err(e) => warn!("Session cleanup failed: {}", e),
            }
        }
    })
}
