//! SQLite-backed store implementations.

use std::time::Duration;

use async_trait::async_trait;

use super::{MetadataStore, SessionStore};
use crate::db::{Database, NewUser, SessionRepository, User, UserRepository};
use crate::file::{NewNode, Node, NodeRepository, ParentId};
use crate::Result;

#[async_trait]
impl MetadataStore for Database {
    async fn is_alive(&self) -> bool {
        self.ping().await
    }

    async fn count_users(&self) -> Result<i64> {
        UserRepository::new(self.pool()).count().await
    }

    async fn count_files(&self) -> Result<i64> {
        NodeRepository::new(self.pool()).count().await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        UserRepository::new(self.pool()).get_by_email(email).await
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>> {
        UserRepository::new(self.pool()).get_by_id(id).await
    }

    async fn insert_user(&self, user: &NewUser) -> Result<User> {
        UserRepository::new(self.pool()).create(user).await
    }

    async fn find_node(&self, id: &str) -> Result<Option<Node>> {
        NodeRepository::new(self.pool()).get_by_id(id).await
    }

    async fn find_owned_node(&self, owner: &str, id: &str) -> Result<Option<Node>> {
        NodeRepository::new(self.pool()).get_owned(owner, id).await
    }

    async fn insert_node(&self, node: &NewNode) -> Result<Node> {
        NodeRepository::new(self.pool()).create(node).await
    }

    async fn list_children(
        &self,
        owner: &str,
        parent: &ParentId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Node>> {
        NodeRepository::new(self.pool())
            .list_children(owner, parent, offset, limit)
            .await
    }

    async fn set_public(&self, owner: &str, id: &str, value: bool) -> Result<Option<Node>> {
        NodeRepository::new(self.pool())
            .set_public(owner, id, value)
            .await
    }
}

/// Session store persisted in the `sessions` table.
#[derive(Debug, Clone)]
pub struct DatabaseSessionStore {
    db: Database,
}

impl DatabaseSessionStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionStore for DatabaseSessionStore {
    async fn is_alive(&self) -> bool {
        self.db.ping().await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX / 2);
        SessionRepository::new(self.db.pool())
            .set(key, value, ttl_secs)
            .await
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        SessionRepository::new(self.db.pool()).get(key).await
    }

    async fn del(&self, key: &str) -> Result<bool> {
        SessionRepository::new(self.db.pool()).delete(key).await
    }

    async fn purge_expired(&self) -> Result<u64> {
        SessionRepository::new(self.db.pool()).cleanup_expired().await
    }
}
