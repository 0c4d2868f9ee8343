//! Response DTOs for the HTTP API.

use serde::Serialize;

use crate::db::User;
use crate::file::{Node, ParentId};

/// Liveness of the backing stores.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Session store.
    pub redis: bool,
    /// Metadata store.
    pub db: bool,
}

/// Record counts.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub users: i64,
    pub files: i64,
}

/// Public view of a user.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Parent reference in responses: the number `0` for root nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParentRef {
    Root(u8),
    Node(String),
}

impl From<ParentId> for ParentRef {
    fn from(parent: ParentId) -> Self {
        match parent {
            ParentId::Root => ParentRef::Root(0),
            ParentId::Node(id) => ParentRef::Node(id),
        }
    }
}

/// File record. The storage locator is never exposed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub is_public: bool,
    pub parent_id: ParentRef,
}

impl From<Node> for FileResponse {
    fn from(node: Node) -> Self {
        Self {
            id: node.id,
            user_id: node.user_id,
            name: node.name,
            node_type: node.node_type.as_str().to_string(),
            is_public: node.is_public,
            parent_id: node.parent_id.into(),
        }
    }
}
