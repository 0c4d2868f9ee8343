//! Thumbnail generation for uploaded images.
//!
//! Image uploads enqueue a [`ThumbnailJob`]. A [`ThumbnailWorker`] consumes
//! the jobs and writes one downscaled rendition per configured width next to
//! the original content (`{locator}_{width}`).

use std::fmt::Debug;
use std::io::Cursor;
use std::sync::Arc;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::node::{is_valid_id, NodeType};
use super::storage::ContentStore;
use crate::store::MetadataStore;
use crate::{FileboxError, Result};

/// Default thumbnail widths in pixels.
pub const DEFAULT_THUMBNAIL_SIZES: [u32; 3] = [500, 250, 100];

/// Request to render thumbnails for one uploaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailJob {
    pub user_id: String,
    pub file_id: String,
}

/// Outbound work queue for thumbnail jobs.
pub trait JobQueue: Send + Sync + Debug {
    /// Hand a job to the queue without waiting for it to be processed.
    fn enqueue(&self, job: ThumbnailJob) -> Result<()>;
}

/// Queue backed by a bounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelQueue {
    sender: mpsc::Sender<ThumbnailJob>,
}

impl ChannelQueue {
    /// Create a queue and the receiver a worker should consume.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<ThumbnailJob>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

impl JobQueue for ChannelQueue {
    fn enqueue(&self, job: ThumbnailJob) -> Result<()> {
        self.sender
            .try_send(job)
            .map_err(|e| FileboxError::Queue(e.to_string()))
    }
}

/// Queue that drops every job (thumbnails disabled).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullQueue;

impl JobQueue for NullQueue {
    fn enqueue(&self, job: ThumbnailJob) -> Result<()> {
        debug!(file_id = %job.file_id, "Thumbnails disabled, dropping job");
        Ok(())
    }
}

/// Resize `content` to `width` pixels wide, keeping the aspect ratio and
/// the original encoding.
pub fn render_thumbnail(content: &[u8], width: u32) -> std::result::Result<Vec<u8>, image::ImageError> {
    let format = image::guess_format(content)?;
    let img = image::load_from_memory_with_format(content, format)?;
    let resized = img.resize(width, u32::MAX, FilterType::Triangle);

    // JPEG has no alpha channel.
    let resized = if format == ImageFormat::Jpeg {
        DynamicImage::ImageRgb8(resized.to_rgb8())
    } else {
        resized
    };

    let mut buf = Cursor::new(Vec::new());
    resized.write_to(&mut buf, format)?;
    Ok(buf.into_inner())
}

/// Consumes thumbnail jobs.
#[derive(Debug, Clone)]
pub struct ThumbnailWorker {
    metadata: Arc<dyn MetadataStore>,
    content: ContentStore,
    sizes: Vec<u32>,
}

impl ThumbnailWorker {
    pub fn new(metadata: Arc<dyn MetadataStore>, content: ContentStore, sizes: Vec<u32>) -> Self {
        Self {
            metadata,
            content,
            sizes,
        }
    }

    /// Process jobs until every sender is dropped.
    pub async fn run(self, mut receiver: mpsc::Receiver<ThumbnailJob>) {
        info!("Thumbnail worker started");
        while let Some(job) = receiver.recv().await {
            if let Err(e) = self.process(&job).await {
                error!(file_id = %job.file_id, "Thumbnail job failed: {}", e);
            }
        }
        info!("Thumbnail worker stopped");
    }

    /// Process one job.
    ///
    /// Returns the number of renditions written. Each width is attempted
    /// independently; a failing width is logged and skipped.
    pub async fn process(&self, job: &ThumbnailJob) -> Result<usize> {
        if job.file_id.is_empty() {
            return Err(FileboxError::Validation("Missing fileId".to_string()));
        }
        if job.user_id.is_empty() {
            return Err(FileboxError::Validation("Missing userId".to_string()));
        }
        if !is_valid_id(&job.file_id) {
            return Err(FileboxError::NotFound("file".to_string()));
        }

        let node = self
            .metadata
            .find_owned_node(&job.user_id, &job.file_id)
            .await?
            .ok_or_else(|| FileboxError::NotFound("file".to_string()))?;

        if node.node_type != NodeType::Image {
            debug!(file_id = %node.id, "Not an image, skipping thumbnails");
            return Ok(0);
        }

        let locator = node
            .local_path
            .as_deref()
            .ok_or_else(|| FileboxError::NotFound("content".to_string()))?;
        let original = Arc::new(self.content.fetch(locator).await?);

        let mut written = 0;
        for &width in &self.sizes {
            let source = Arc::clone(&original);
            let rendered =
                tokio::task::spawn_blocking(move || render_thumbnail(&source, width)).await;

            let bytes = match rendered {
                Ok(Ok(bytes)) => bytes,
                Ok(Err(e)) => {
                    warn!(file_id = %node.id, width, "Failed to generate thumbnail: {}", e);
                    continue;
                }
                Err(e) => {
                    warn!(file_id = %node.id, width, "Thumbnail task aborted: {}", e);
                    continue;
                }
            };

            match self.content.store_rendition(locator, width, &bytes).await {
                Ok(()) => written += 1,
                Err(e) => warn!(file_id = %node.id, width, "Failed to write thumbnail: {}", e),
            }
        }

        info!(file_id = %node.id, written, "Thumbnails generated");
        Ok(written)
    }
}
