//! Label-class taxonomy stored as a single JSON array document.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clipmark_core::error::CoreError;
use clipmark_core::taxonomy::default_classes;

use crate::document::DocumentStore;

/// Ordered list of label-class names.
#[derive(Clone)]
pub struct TaxonomyRegistry {
    path: PathBuf,
    documents: Arc<dyn DocumentStore>,
    // Serializes seeding and replacement.
    write_lock: Arc<tokio::sync::Mutex<()>>,
}

impl TaxonomyRegistry {
    pub fn new(path: impl Into<PathBuf>, documents: Arc<dyn DocumentStore>) -> Self {
        Self {
            path: path.into(),
            documents,
            write_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the classes, seeding the default list on first access.
    pub async fn load(&self) -> Result<Vec<String>, CoreError> {
        if let Some(classes) = self.read().await? {
            return Ok(classes);
        }

        let _guard = self.write_lock.lock().await;
        // Another caller may have seeded while we waited.
        if let Some(classes) = self.read().await? {
            return Ok(classes);
        }

        let classes = default_classes();
        self.write(&classes).await?;
        tracing::info!(path = %self.path.display(), count = classes.len(), "Seeded default taxonomy");
        Ok(classes)
    }

    /// Replace the whole list. `None` means the caller sent no list.
    ///
    /// Contents are stored as given: duplicates and empty lists are accepted.
    pub async fn replace_all(&self, classes: Option<Vec<String>>) -> Result<Vec<String>, CoreError> {
        let classes =
            classes.ok_or_else(|| CoreError::Validation("Missing classes list".to_string()))?;

        let _guard = self.write_lock.lock().await;
        self.write(&classes).await?;
        tracing::info!(count = classes.len(), "Taxonomy replaced");
        Ok(classes)
    }

    async fn read(&self) -> Result<Option<Vec<String>>, CoreError> {
        match self.documents.read(&self.path).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| CoreError::corrupt(&self.path, e.to_string())),
            None => Ok(None),
        }
    }

    async fn write(&self, classes: &[String]) -> Result<(), CoreError> {
        let value = serde_json::to_value(classes)
            .map_err(|e| CoreError::storage(&self.path, std::io::Error::other(e)))?;
        self.documents.write(&self.path, &value).await
    }
}
