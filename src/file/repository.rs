//! Node repository for Filebox file management.

use uuid::Uuid;

use super::node::{NewNode, Node, ParentId};
use crate::db::DbPool;
use crate::{FileboxError, Result};

const NODE_COLUMNS: &str = "id, user_id, name, type, is_public, parent_id, local_path";

/// Repository for file and folder node operations.
pub struct NodeRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> NodeRepository<'a> {
    /// Create a new NodeRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a node and return it with its generated ID.
    pub async fn create(&self, new_node: &NewNode) -> Result<Node> {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO files (id, user_id, name, type, is_public, parent_id, local_path)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&new_node.user_id)
        .bind(&new_node.name)
        .bind(new_node.node_type.as_str())
        .bind(new_node.is_public)
        .bind(new_node.parent_id.as_str())
        .bind(&new_node.local_path)
        .execute(self.pool)
        .await?;

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| FileboxError::NotFound("file".to_string()))
    }

    /// Get a node by ID regardless of owner.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Node>> {
        let sql = format!("SELECT {NODE_COLUMNS} FROM files WHERE id = ?");
        let node = sqlx::query_as::<_, Node>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(node)
    }

    /// Get a node by ID only if it belongs to `owner`.
    pub async fn get_owned(&self, owner: &str, id: &str) -> Result<Option<Node>> {
        let sql = format!("SELECT {NODE_COLUMNS} FROM files WHERE id = ? AND user_id = ?");
        let node = sqlx::query_as::<_, Node>(&sql)
            .bind(id)
            .bind(owner)
            .fetch_optional(self.pool)
            .await?;
        Ok(node)
    }

    /// List an owner's nodes under `parent` in insertion order.
    pub async fn list_children(
        &self,
        owner: &str,
        parent: &ParentId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Node>> {
        let sql = format!(
            "SELECT {NODE_COLUMNS} FROM files
             WHERE user_id = ? AND parent_id = ?
             ORDER BY seq
             LIMIT ? OFFSET ?"
        );
        let nodes = sqlx::query_as::<_, Node>(&sql)
            .bind(owner)
            .bind(parent.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;
        Ok(nodes)
    }

    /// Set `is_public` on an owned node in a single statement.
    ///
    /// Returns the updated node, or None if no owned node matched.
    pub async fn set_public(&self, owner: &str, id: &str, value: bool) -> Result<Option<Node>> {
        let sql = format!(
            "UPDATE files SET is_public = ? WHERE id = ? AND user_id = ? RETURNING {NODE_COLUMNS}"
        );
        let node = sqlx::query_as::<_, Node>(&sql)
            .bind(value)
            .bind(id)
            .bind(owner)
            .fetch_optional(self.pool)
            .await?;
        Ok(node)
    }

    /// Count all nodes.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
