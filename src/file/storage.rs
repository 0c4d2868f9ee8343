//! Content storage for Filebox.
//!
//! Uploaded bytes live under a single root directory, one file per item,
//! named by a freshly generated UUID:
//! ```text
//! {root}/
//! ├── 3f0b6c1e-6d1a-4c7e-9a55-2b1f0e8d9c41
//! ├── 3f0b6c1e-6d1a-4c7e-9a55-2b1f0e8d9c41_500
//! └── ...
//! ```
//! The locator recorded on a node is the full path of its file.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::{FileboxError, Result};

/// Content store adapter writing raw bytes to local disk.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist `content` under a fresh identifier and return its locator.
    pub async fn store(&self, content: &[u8]) -> Result<String> {
        fs::create_dir_all(&self.root).await?;

        let path = self.root.join(Uuid::new_v4().to_string());
        fs::write(&path, content).await?;

        Ok(path.to_string_lossy().into_owned())
    }

    /// Read back previously stored bytes.
    pub async fn fetch(&self, locator: &str) -> Result<Vec<u8>> {
        match fs::read(locator).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(FileboxError::NotFound("content".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write a derived rendition next to the original.
    pub async fn store_rendition(&self, locator: &str, width: u32, content: &[u8]) -> Result<()> {
        fs::write(rendition_locator(locator, width), content).await?;
        Ok(())
    }

    /// Read a derived rendition.
    pub async fn fetch_rendition(&self, locator: &str, width: u32) -> Result<Vec<u8>> {
        self.fetch(&rendition_locator(locator, width)).await
    }
}

/// Locator of the `width` rendition of `locator`.
pub fn rendition_locator(locator: &str, width: u32) -> String {
    format!("{locator}_{width}")
}
