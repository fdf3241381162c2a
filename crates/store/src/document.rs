//! Key-value document persistence keyed by file path.
//!
//! [`DocumentStore`] is the seam every store in this crate goes through;
//! [`FsDocumentStore`] is the filesystem implementation used in production
//! and tests.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use clipmark_core::error::CoreError;

/// Path-keyed storage of JSON documents and plain files.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read and parse the document at `path`. `Ok(None)` if it does not exist.
    async fn read(&self, path: &Path) -> Result<Option<Value>, CoreError>;

    /// Fully overwrite the document at `path`.
    async fn write(&self, path: &Path, document: &Value) -> Result<(), CoreError>;

    /// Whether a regular file exists at `path`.
    async fn exists(&self, path: &Path) -> Result<bool, CoreError>;

    /// Move the file at `src` to `dst`. The source no longer exists on success.
    async fn move_file(&self, src: &Path, dst: &Path) -> Result<(), CoreError>;

    /// Remove the file at `path`. Removing an absent file is not an error.
    async fn remove(&self, path: &Path) -> Result<(), CoreError>;

    /// Names of the regular files directly inside `dir`.
    async fn list_dir(&self, dir: &Path) -> Result<Vec<String>, CoreError>;
}

/// [`DocumentStore`] backed by the local filesystem.
///
/// Writes go to a hidden temp file next to the target and are renamed into
/// place, so readers never observe a half-written document.
#[derive(Debug, Clone, Default)]
pub struct FsDocumentStore;

impl FsDocumentStore {
    pub fn new() -> Self {
        Self
    }
}

/// Sibling temp path used for the write-then-rename of `path`.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.{}.tmp", uuid::Uuid::new_v4()))
}

async fn ensure_parent(path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CoreError::storage(parent, e))?;
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn read(&self, path: &Path) -> Result<Option<Value>, CoreError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CoreError::storage(path, e)),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| CoreError::corrupt(path, e.to_string()))
    }

    async fn write(&self, path: &Path, document: &Value) -> Result<(), CoreError> {
        ensure_parent(path).await?;

        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| CoreError::storage(path, std::io::Error::other(e)))?;

        let tmp = temp_path_for(path);
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| CoreError::storage(&tmp, e))?;

        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(CoreError::storage(path, e));
        }

        tracing::trace!(path = %path.display(), bytes = bytes.len(), "Document written");
        Ok(())
    }

    async fn exists(&self, path: &Path) -> Result<bool, CoreError> {
        match tokio::fs::metadata(path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CoreError::storage(path, e)),
        }
    }

    async fn move_file(&self, src: &Path, dst: &Path) -> Result<(), CoreError> {
        if src == dst {
            return Ok(());
        }
        ensure_parent(dst).await?;

        match tokio::fs::rename(src, dst).await {
            Ok(()) => Ok(()),
            Err(rename_err) if rename_err.kind() == ErrorKind::CrossesDevices => {
                tracing::debug!(
                    src = %src.display(),
                    dst = %dst.display(),
                    "Rename crosses devices, falling back to copy and delete"
                );
                tokio::fs::copy(src, dst)
                    .await
                    .map_err(|e| CoreError::storage(dst, e))?;
                tokio::fs::remove_file(src)
                    .await
                    .map_err(|e| CoreError::storage(src, e))
            }
            Err(rename_err) => Err(CoreError::storage(src, rename_err)),
        }
    }

    async fn remove(&self, path: &Path) -> Result<(), CoreError> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::storage(path, e)),
        }
    }

    async fn list_dir(&self, dir: &Path) -> Result<Vec<String>, CoreError> {
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| CoreError::storage(dir, e))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CoreError::storage(dir, e))?
        {
            let path = entry.path();
            // Follows symlinks, so a link to a media file counts as a file.
            let is_file = match tokio::fs::metadata(&path).await {
                Ok(meta) => meta.is_file(),
                Err(e) if e.kind() == ErrorKind::NotFound => false,
                Err(e) => return Err(CoreError::storage(&path, e)),
            };
            if !is_file {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        Ok(names)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
