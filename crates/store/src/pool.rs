//! Directory-scoped item pools.
//!
//! Membership is a live directory scan: an item belongs to a pool exactly
//! when a media file with that name sits directly in the pool directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clipmark_core::error::CoreError;
use clipmark_core::media::{is_media_file, validate_item_id};
use clipmark_core::pool::PoolKind;

use crate::annotations::AnnotationStore;
use crate::document::DocumentStore;
use crate::locks::ItemLocks;

/// One lifecycle stage: a media directory plus its annotation store.
#[derive(Clone)]
pub struct Pool {
    kind: PoolKind,
    dir: PathBuf,
    documents: Arc<dyn DocumentStore>,
    annotations: AnnotationStore,
}

impl Pool {
    pub fn new(
        kind: PoolKind,
        dir: impl Into<PathBuf>,
        documents: Arc<dyn DocumentStore>,
        locks: Arc<ItemLocks>,
    ) -> Self {
        let dir = dir.into();
        let annotations = AnnotationStore::new(kind, dir.clone(), Arc::clone(&documents), locks);
        Self {
            kind,
            dir,
            documents,
            annotations,
        }
    }

    pub fn kind(&self) -> PoolKind {
        self.kind
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    /// Media item names in this pool, sorted.
    pub async fn list_items(&self) -> Result<Vec<String>, CoreError> {
        let mut items: Vec<String> = self
            .documents
            .list_dir(&self.dir)
            .await?
            .into_iter()
            .filter(|name| is_media_file(name))
            .collect();
        items.sort();
        Ok(items)
    }

    /// Whether `item_id` is currently a member of this pool.
    pub async fn contains(&self, item_id: &str) -> Result<bool, CoreError> {
        validate_item_id(item_id)?;
        if !is_media_file(item_id) {
            return Ok(false);
        }
        self.documents.exists(&self.media_file(item_id)).await
    }

    /// Path of the media file for `item_id`, which must exist.
    pub async fn media_path(&self, item_id: &str) -> Result<PathBuf, CoreError> {
        if !self.contains(item_id).await? {
            return Err(CoreError::NotFound {
                entity: "Video file",
                id: item_id.to_string(),
            });
        }
        Ok(self.media_file(item_id))
    }

    /// Where the media file for `item_id` lives or would live.
    pub(crate) fn media_file(&self, item_id: &str) -> PathBuf {
        self.dir.join(item_id)
    }
}
