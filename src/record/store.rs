//! File-backed store for the prompt record
//!
//! One file at a fixed path. Writes truncate and replace; there is no locking,
//! so concurrent submits are last-writer-wins.

use std::path::{Path, PathBuf};
use tokio::fs;

use super::{PromptRecord, StoreError};

#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
    file_name: String,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>, file_name: &str) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Full path of the record file
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Create the output directory and its parents if missing
    pub async fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::Io {
                path: self.dir.clone(),
                source: e,
            })
    }

    /// Overwrite the record file with the rendered record
    pub async fn save(&self, record: &PromptRecord) -> Result<(), StoreError> {
        self.ensure_dir().await?;
        let path = self.path();
        fs::write(&path, record.render())
            .await
            .map_err(|e| StoreError::Io { path, source: e })
    }

    /// Read the whole record file
    pub async fn load(&self) -> Result<Vec<u8>, StoreError> {
        let path = self.path();
        fs::read(&path)
            .await
            .map_err(|e| StoreError::from_io(path, e))
    }
}
