//! Media Storage
//!
//! Stores uploaded file bytes under a configured root directory with a
//! uuid-prefixed name, returning the storage path.

use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use mg_config::MediaConfig;

use crate::shared::error::{PlatformError, Result};

pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &MediaConfig) -> Self {
        Self::new(&config.upload_dir)
    }

    /// Store a file's bytes and return the path it was written to.
    ///
    /// Fails when no file content is supplied. The suggested name is reduced
    /// to its final path component so callers cannot escape the root.
    pub async fn store(&self, bytes: &[u8], suggested_name: &str) -> Result<PathBuf> {
        if bytes.is_empty() {
            return Err(PlatformError::storage("No file supplied"));
        }

        let file_name = Path::new(suggested_name)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("upload");

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| PlatformError::storage(format!("Failed to create upload dir: {}", e)))?;

        let path = self.root.join(format!("{}-{}", Uuid::new_v4(), file_name));
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| PlatformError::storage(format!("Failed to write upload: {}", e)))?;

        debug!(path = %path.display(), "Stored uploaded file");
        Ok(path)
    }
}
