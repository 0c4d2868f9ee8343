//! File management module for Filebox.
//!
//! This module provides the per-user file tree:
//! - Folder, file and image nodes with root or folder parents
//! - Content storage on local disk
//! - Visibility rules for content reads
//! - Thumbnail generation for images

mod node;
mod repository;
mod service;
mod storage;
mod thumbnail;

pub use node::{is_valid_id, NewNode, Node, NodeType, ParentId, ROOT_PARENT};
pub use repository::NodeRepository;
pub use service::{mime_for, FileTreeManager, NodeContent, UploadRequest};
pub use storage::{rendition_locator, ContentStore};
pub use thumbnail::{
    render_thumbnail, ChannelQueue, JobQueue, NullQueue, ThumbnailJob, ThumbnailWorker,
    DEFAULT_THUMBNAIL_SIZES,
};

/// Number of nodes per listing page.
pub const PAGE_SIZE: i64 = 20;

/// Default maximum file size (10MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
