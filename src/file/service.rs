//! File tree operations for Filebox.
//!
//! This module provides the high-level node operations:
//! - Folder and file creation with parent validation
//! - Owner-scoped lookup, listing and publish toggles
//! - Content reads honouring public/private visibility

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::node::{is_valid_id, NewNode, Node, NodeType, ParentId};
use super::storage::ContentStore;
use super::thumbnail::{JobQueue, NullQueue, ThumbnailJob};
use super::{DEFAULT_MAX_FILE_SIZE, PAGE_SIZE};
use crate::store::MetadataStore;
use crate::{FileboxError, Result};

/// Request data for creating a node.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Display name.
    pub name: String,
    /// Requested type as sent by the client.
    pub node_type: String,
    /// Parent folder or root.
    pub parent_id: ParentId,
    /// Initial visibility.
    pub is_public: bool,
    /// Decoded content, required for files and images.
    pub content: Option<Vec<u8>>,
}

impl UploadRequest {
    /// Create a private root-level request without content.
    pub fn new(name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: node_type.into(),
            parent_id: ParentId::Root,
            is_public: false,
            content: None,
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

    /// Set the content.
    pub fn with_content(mut self, content: impl Into<Vec<u8>>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Bytes read from a node together with their content type.
#[derive(Debug, Clone)]
pub struct NodeContent {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Manages users' file trees.
#[derive(Debug, Clone)]
pub struct FileTreeManager {
    metadata: Arc<dyn MetadataStore>,
    content: ContentStore,
    queue: Arc<dyn JobQueue>,
    max_file_size: u64,
    thumbnail_sizes: Vec<u32>,
}

impl FileTreeManager {
    /// Create a manager without a thumbnail queue.
    pub fn new(metadata: Arc<dyn MetadataStore>, content: ContentStore) -> Self {
        Self {
            metadata,
            content,
            queue: Arc::new(NullQueue),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            thumbnail_sizes: Vec::new(),
        }
    }

    /// Set the queue image uploads are announced on.
    pub fn with_queue(mut self, queue: Arc<dyn JobQueue>) -> Self {
        self.queue = queue;
        self
    }

    /// Set the maximum content size in bytes.
    pub fn with_max_file_size(mut self, max_size: u64) -> Self {
        self.max_file_size = max_size;
        self
    }

    /// Set the rendition widths that may be requested.
    pub fn with_thumbnail_sizes(mut self, sizes: Vec<u32>) -> Self {
        self.thumbnail_sizes = sizes;
        self
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Create a folder, file or image owned by `owner`.
    ///
    /// The parent, when given, only has to exist and be a folder. It is not
    /// required to belong to `owner`.
    pub async fn create_node(&self, owner: &str, request: UploadRequest) -> Result<Node> {
        if request.name.is_empty() {
            return Err(FileboxError::Validation("Missing name".to_string()));
        }
        let node_type: NodeType = request
            .node_type
            .parse()
            .map_err(|_| FileboxError::Validation("Missing type".to_string()))?;
        if node_type.has_content() && request.content.is_none() {
            return Err(FileboxError::Validation("Missing data".to_string()));
        }
        if let Some(content) = &request.content {
            if content.len() as u64 > self.max_file_size {
                return Err(FileboxError::Validation("File too large".to_string()));
            }
        }

        if let ParentId::Node(parent_id) = &request.parent_id {
            self.check_parent(parent_id).await?;
        }

        let mut new_node = NewNode::new(owner, request.name, node_type)
            .with_parent(request.parent_id)
            .with_public(request.is_public);

        if node_type == NodeType::Folder {
            let node = self.metadata.insert_node(&new_node).await?;
            info!(user_id = %owner, file_id = %node.id, "Folder created");
            return Ok(node);
        }

        let content = request.content.unwrap_or_default();
        let locator = self.content.store(&content).await?;
        new_node = new_node.with_local_path(locator);
        let node = self.metadata.insert_node(&new_node).await?;
        info!(
            user_id = %owner,
            file_id = %node.id,
            size = content.len(),
            "File stored"
        );

        if node_type == NodeType::Image {
            let job = ThumbnailJob {
                user_id: owner.to_string(),
                file_id: node.id.clone(),
            };
            if let Err(e) = self.queue.enqueue(job) {
                warn!(file_id = %node.id, "Failed to enqueue thumbnail job: {}", e);
            }
        }

        Ok(node)
    }

    async fn check_parent(&self, parent_id: &str) -> Result<()> {
        if !is_valid_id(parent_id) {
            return Err(FileboxError::Validation("Parent not found".to_string()));
        }
        let parent = self
            .metadata
            .find_node(parent_id)
            .await?
            .ok_or_else(|| FileboxError::Validation("Parent not found".to_string()))?;
        if parent.node_type != NodeType::Folder {
            return Err(FileboxError::Validation(
                "Parent is not a folder".to_string(),
            ));
        }
        Ok(())
    }

    /// Get a node owned by `owner`.
    pub async fn get_node(&self, owner: &str, id: &str) -> Result<Node> {
        if !is_valid_id(id) {
            return Err(FileboxError::NotFound("file".to_string()));
        }
        self.metadata
            .find_owned_node(owner, id)
            .await?
            .ok_or_else(|| FileboxError::NotFound("file".to_string()))
    }

    /// List one page of `owner`'s nodes directly under `parent`.
    ///
    /// A malformed parent ID yields an empty page.
    pub async fn list_children(&self, owner: &str, parent: &ParentId, page: u32) -> Result<Vec<Node>> {
        if let ParentId::Node(id) = parent {
            if !is_valid_id(id) {
                debug!(parent_id = %id, "Malformed parent id, returning empty page");
                return Ok(Vec::new());
            }
        }
        let offset = i64::from(page) * PAGE_SIZE;
        self.metadata
            .list_children(owner, parent, offset, PAGE_SIZE)
            .await
    }

    /// Set the visibility of an owned node.
    pub async fn set_public(&self, owner: &str, id: &str, value: bool) -> Result<Node> {
        if !is_valid_id(id) {
            return Err(FileboxError::NotFound("file".to_string()));
        }
        let node = self
            .metadata
            .set_public(owner, id, value)
            .await?
            .ok_or_else(|| FileboxError::NotFound("file".to_string()))?;
        info!(user_id = %owner, file_id = %id, is_public = value, "Visibility changed");
        Ok(node)
    }

    /// Find a node the requester may read, rejecting folders.
    async fn readable_node(&self, requester: Option<&str>, id: &str) -> Result<(Node, String)> {
        if !is_valid_id(id) {
            return Err(FileboxError::NotFound("file".to_string()));
        }
        let node = self
            .metadata
            .find_node(id)
            .await?
            .ok_or_else(|| FileboxError::NotFound("file".to_string()))?;

        if !node.is_visible_to(requester) {
            return Err(FileboxError::NotFound("file".to_string()));
        }
        if node.node_type == NodeType::Folder {
            return Err(FileboxError::NoContent(
                "A folder doesn't have content".to_string(),
            ));
        }
        let locator = node
            .local_path
            .clone()
            .ok_or_else(|| FileboxError::NotFound("content".to_string()))?;
        Ok((node, locator))
    }

    /// Read a node's content.
    ///
    /// Private nodes are only readable by their owner; everyone else gets
    /// `NotFound`, same as for a missing node.
    pub async fn read_content(&self, requester: Option<&str>, id: &str) -> Result<NodeContent> {
        let (node, locator) = self.readable_node(requester, id).await?;
        let bytes = self.content.fetch(&locator).await?;
        Ok(NodeContent {
            bytes,
            mime_type: mime_for(&node.name),
        })
    }

    /// Read the `width` rendition of an image node.
    pub async fn read_thumbnail(
        &self,
        requester: Option<&str>,
        id: &str,
        width: u32,
    ) -> Result<NodeContent> {
        if !self.thumbnail_sizes.contains(&width) {
            return Err(FileboxError::Validation("Invalid size".to_string()));
        }
        let (node, locator) = self.readable_node(requester, id).await?;
        let bytes = self.content.fetch_rendition(&locator, width).await?;
        Ok(NodeContent {
            bytes,
            mime_type: mime_for(&node.name),
        })
    }
}

/// Content type derived from a file name's extension.
pub fn mime_for(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
