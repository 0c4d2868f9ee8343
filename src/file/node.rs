//! File and folder node types.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Kind of a node in a user's file tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// A folder. Folders never carry content.
    Folder,
    /// A plain file.
    File,
    /// An image file. Uploads enqueue thumbnail generation.
    Image,
}

impl NodeType {
    /// Convert to the stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Folder => "folder",
            NodeType::File => "file",
            NodeType::Image => "image",
        }
    }

    /// Whether nodes of this type carry stored content.
    pub fn has_content(&self) -> bool {
        !matches!(self, NodeType::Folder)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "folder" => Ok(NodeType::Folder),
            "file" => Ok(NodeType::File),
            "image" => Ok(NodeType::Image),
            _ => Err(format!("unknown node type: {s}")),
        }
    }
}

impl TryFrom<String> for NodeType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Sentinel stored for root-level nodes.
pub const ROOT_PARENT: &str = "0";

/// Parent reference of a node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParentId {
    /// Root level, no parent.
    #[default]
    Root,
    /// Id of the parent folder.
    Node(String),
}

impl ParentId {
    /// Parse a client-supplied parent reference. `"0"` and empty mean root.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ROOT_PARENT {
            ParentId::Root
        } else {
            ParentId::Node(value.to_string())
        }
    }

    /// The stored column value.
    pub fn as_str(&self) -> &str {
        match self {
            ParentId::Root => ROOT_PARENT,
            ParentId::Node(id) => id,
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, ParentId::Root)
    }
}

impl From<String> for ParentId {
    fn from(value: String) -> Self {
        ParentId::parse(&value)
    }
}

/// Whether a string is a well-formed node or user identifier.
pub fn is_valid_id(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}

/// A file or folder metadata record.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Node {
    /// Unique node ID (UUID string).
    pub id: String,
    /// Owner user ID.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Node kind.
    #[sqlx(rename = "type", try_from = "String")]
    pub node_type: NodeType,
    /// Whether anyone may read the content.
    pub is_public: bool,
    /// Parent folder or root.
    #[sqlx(try_from = "String")]
    pub parent_id: ParentId,
    /// Storage locator of the content (None for folders).
    pub local_path: Option<String>,
}

impl Node {
    /// Whether the given requester may read this node's content.
    pub fn is_visible_to(&self, requester: Option<&str>) -> bool {
        self.is_public || requester == Some(self.user_id.as_str())
    }
}

/// Data for creating a new node.
#[derive(Debug, Clone)]
pub struct NewNode {
    /// Owner user ID.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Node kind.
    pub node_type: NodeType,
    /// Initial visibility.
    pub is_public: bool,
    /// Parent folder or root.
    pub parent_id: ParentId,
    /// Storage locator of the content.
    pub local_path: Option<String>,
}

impl NewNode {
    /// Create a new private root-level node.
    pub fn new(user_id: impl Into<String>, name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            node_type,
            is_public: false,
            parent_id: ParentId::Root,
            local_path: None,
        }
    }

    /// Set the parent.
    pub fn with_parent(mut self, parent_id: ParentId) -> Self {
        self.parent_id = parent_id;
        self
    }

    /// Set the visibility.
    pub fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    /// Set the storage locator.
    pub fn with_local_path(mut self, local_path: impl Into<String>) -> Self {
        self.local_path = Some(local_path.into());
        self
    }
}
