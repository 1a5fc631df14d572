//! File operations

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::warn;

use crate::errors::DeployError;

/// A file wrapper with path
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
}

impl File {
    /// Create a new file reference
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the file exists
    pub async fn exists(&self) -> bool {
        fs::metadata(&self.path).await.is_ok()
    }

    /// Read file contents as string
    pub async fn read_string(&self) -> Result<String, DeployError> {
        let mut file = fs::File::open(&self.path).await?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).await?;
        Ok(contents)
    }

    /// Read file as JSON
    pub async fn read_json<T: DeserializeOwned>(&self) -> Result<T, DeployError> {
        let contents = self.read_string().await?;
        let value = serde_json::from_str(&contents)?;
        Ok(value)
    }

    /// Write string to file
    pub async fn write_string(&self, contents: &str) -> Result<(), DeployError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&self.path).await?;
        file.write_all(contents.as_bytes()).await?;
        file.sync_all().await?;
        Ok(())
    }

    /// Write JSON to file
    pub async fn write_json<T: Serialize>(&self, value: &T) -> Result<(), DeployError> {
        let contents = serde_json::to_string_pretty(value)?;
        self.write_string(&contents).await
    }

    /// Delete the file
    pub async fn delete(&self) -> Result<(), DeployError> {
        if self.exists().await {
            fs::remove_file(&self.path).await?;
        }
        Ok(())
    }
}

/// A file that is removed when the guard goes out of scope.
///
/// The drop path covers panics and early returns; callers on the happy path
/// should prefer the explicit async [`ScopedFile::cleanup`].
#[derive(Debug)]
pub struct ScopedFile {
    file: File,
    armed: bool,
}

impl ScopedFile {
    /// Write `value` as pretty-printed JSON and take ownership of the file
    pub async fn create_json<T: Serialize>(
        path: impl Into<PathBuf>,
        value: &T,
    ) -> Result<Self, DeployError> {
        let file = File::new(path);
        file.write_json(value).await?;
        Ok(Self { file, armed: true })
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the file now instead of waiting for drop
    pub async fn cleanup(mut self) {
        self.armed = false;
        if let Err(e) = self.file.delete().await {
            warn!("Failed to remove {}: {}", self.file.path().display(), e);
        }
    }
}

impl Drop for ScopedFile {
    fn drop(&mut self) {
        if self.armed {
            let _ = std::fs::remove_file(self.file.path());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ecsup-test-{}-{}", name, uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_scoped_file_removed_on_cleanup() {
        tokio_test::block_on(async {
            let path = scratch_path("cleanup");
            let scoped = ScopedFile::create_json(&path, &serde_json::json!({"a": 1}))
                .await
                .unwrap();
            assert!(scoped.path().exists());
            scoped.cleanup().await;
            assert!(!path.exists());
        });
    }

    #[test]
    fn test_scoped_file_removed_on_drop() {
        tokio_test::block_on(async {
            let path = scratch_path("drop");
            let scoped = ScopedFile::create_json(&path, &serde_json::json!({"a": 1}))
                .await
                .unwrap();
            drop(scoped);
            assert!(!path.exists());
        });
    }

    #[test]
    fn test_json_round_trip() {
        tokio_test::block_on(async {
            let path = scratch_path("json");
            let file = File::new(&path);
            file.write_json(&serde_json::json!({"key": "value"})).await.unwrap();
            let value: serde_json::Value = file.read_json().await.unwrap();
            assert_eq!(value["key"], "value");
            file.delete().await.unwrap();
            assert!(!file.exists().await);
        });
    }
}
