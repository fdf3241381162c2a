//! Per-pool annotation documents: `<pool_dir>/<item_id>.json`.
//!
//! Appends keep insertion order. Deletion addresses records by their position
//! in ascending `start_frame` order and persists that sorted order, so the
//! first delete on an item permanently canonicalizes its stored order.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use clipmark_core::annotation::{
    coerce_index, sorted_by_start_frame, AnnotationRecord, AnnotationSet,
};
use clipmark_core::error::CoreError;
use clipmark_core::media::{annotation_document_name, validate_item_id};
use clipmark_core::pool::PoolKind;

use crate::document::DocumentStore;
use crate::locks::ItemLocks;

/// Annotation CRUD for the items of one pool.
#[derive(Clone)]
pub struct AnnotationStore {
    pool: PoolKind,
    dir: PathBuf,
    documents: Arc<dyn DocumentStore>,
    locks: Arc<ItemLocks>,
}

impl AnnotationStore {
    pub fn new(
        pool: PoolKind,
        dir: impl Into<PathBuf>,
        documents: Arc<dyn DocumentStore>,
        locks: Arc<ItemLocks>,
    ) -> Self {
        Self {
            pool,
            dir: dir.into(),
            documents,
            locks,
        }
    }

    pub fn pool(&self) -> PoolKind {
        self.pool
    }

    /// Location of the annotation document for `item_id`.
    pub fn document_path(&self, item_id: &str) -> PathBuf {
        self.dir.join(annotation_document_name(item_id))
    }

    /// Whether an annotation document exists for `item_id`.
    pub async fn has_document(&self, item_id: &str) -> Result<bool, CoreError> {
        validate_item_id(item_id)?;
        self.documents.exists(&self.document_path(item_id)).await
    }

    /// The annotations of `item_id`, or an empty set if none were saved yet.
    pub async fn get(&self, item_id: &str) -> Result<AnnotationSet, CoreError> {
        validate_item_id(item_id)?;
        Ok(self
            .load(item_id)
            .await?
            .unwrap_or_else(|| AnnotationSet::empty(item_id)))
    }

    /// Append `record` to the end of the annotations of `item_id`.
    ///
    /// Creates the document on first use. The list is not re-sorted.
    pub async fn append(&self, item_id: &str, record: Value) -> Result<AnnotationSet, CoreError> {
        validate_item_id(item_id)?;
        let record = AnnotationRecord::new(record)?;

        let _guard = self.locks.lock(self.pool, item_id).await;

        let mut set = self
            .load(item_id)
            .await?
            .unwrap_or_else(|| AnnotationSet::empty(item_id));
        set.annotations.push(record);
        self.replace_all(&set).await?;

        tracing::info!(
            pool = %self.pool,
            item_id,
            annotation_count = set.annotations.len(),
            "Annotation appended"
        );
        Ok(set)
    }

    /// Remove the record at `index` in ascending `start_frame` order.
    ///
    /// Persists the remaining records in sorted order and returns them.
    pub async fn delete_at(
        &self,
        item_id: &str,
        index: &Value,
    ) -> Result<Vec<AnnotationRecord>, CoreError> {
        validate_item_id(item_id)?;

        let _guard = self.locks.lock(self.pool, item_id).await;

        let path = self.document_path(item_id);
        let mut set = self.load(item_id).await?.ok_or_else(|| CoreError::NotFound {
            entity: "Annotation file",
            id: item_id.to_string(),
        })?;

        let mut sorted = sorted_by_start_frame(std::mem::take(&mut set.annotations), &path)?;
        let index = coerce_index(index)?;
        if index < 0 || index as usize >= sorted.len() {
            return Err(CoreError::Range {
                index,
                len: sorted.len(),
            });
        }

        sorted.remove(index as usize);
        set.annotations = sorted;
        self.replace_all(&set).await?;

        tracing::info!(
            pool = %self.pool,
            item_id,
            index,
            remaining = set.annotations.len(),
            "Annotation deleted"
        );
        Ok(set.annotations)
    }

    /// Overwrite the whole document for `set.item_id`.
    ///
    /// Callers must hold the item lock.
    async fn replace_all(&self, set: &AnnotationSet) -> Result<(), CoreError> {
        let path = self.document_path(&set.item_id);
        let value = serde_json::to_value(set)
            .map_err(|e| CoreError::storage(&path, std::io::Error::other(e)))?;
        self.documents.write(&path, &value).await
    }

    async fn load(&self, item_id: &str) -> Result<Option<AnnotationSet>, CoreError> {
        let path = self.document_path(item_id);
        match self.documents.read(&path).await? {
            Some(value) => parse_set(value, &path).map(Some),
            None => Ok(None),
        }
    }
}

fn parse_set(value: Value, path: &Path) -> Result<AnnotationSet, CoreError> {
    serde_json::from_value(value).map_err(|e| CoreError::corrupt(path, e.to_string()))
}
