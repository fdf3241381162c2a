//! Promotion of items from the Pending pool to the Finished pool.
//!
//! A promotion moves two files: the media file and, when present, its
//! annotation document. An intent record is written to the promotion journal
//! before the first move and removed after the last, so [`LifecycleManager::reconcile`]
//! can finish or discard a promotion interrupted between the two moves.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clipmark_core::annotation::AnnotationSet;
use clipmark_core::error::CoreError;
use clipmark_core::media::validate_item_id;
use clipmark_core::pool::PoolKind;
use clipmark_core::promotion::{intent_file_name, PromotedItem, PromotionIntent, INTENT_SUFFIX};

use crate::document::DocumentStore;
use crate::locks::ItemLocks;
use crate::pool::Pool;

/// What [`LifecycleManager::reconcile`] did with one dangling intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Media never left Pending; the intent was dropped.
    Discarded { item_id: String },
    /// Media was already in Finished; the annotation move was completed.
    /// Records added in Finished meanwhile are kept after the Pending ones.
    Completed { item_id: String, annotations_moved: bool },
    /// Media is in neither pool; the intent was dropped.
    Orphaned { item_id: String },
}

/// Moves items and their annotations from Pending to Finished.
#[derive(Clone)]
pub struct LifecycleManager {
    pending: Pool,
    finished: Pool,
    journal_dir: PathBuf,
    documents: Arc<dyn DocumentStore>,
    locks: Arc<ItemLocks>,
}

impl LifecycleManager {
    pub fn new(
        pending: Pool,
        finished: Pool,
        journal_dir: impl Into<PathBuf>,
        documents: Arc<dyn DocumentStore>,
        locks: Arc<ItemLocks>,
    ) -> Self {
        Self {
            pending,
            finished,
            journal_dir: journal_dir.into(),
            documents,
            locks,
        }
    }

    pub fn journal_dir(&self) -> &Path {
        &self.journal_dir
    }

    /// Move `item_id` from Pending to Finished.
    ///
    /// Fails with `NotFound` before touching anything if the media file is not
    /// in Pending. A missing annotation document is not an error.
    pub async fn promote(&self, item_id: &str) -> Result<PromotedItem, CoreError> {
        validate_item_id(item_id)?;

        // Fixed order: Pending before Finished.
        let _pending_guard = self.locks.lock(PoolKind::Pending, item_id).await;
        let _finished_guard = self.locks.lock(PoolKind::Finished, item_id).await;

        if !self.pending.contains(item_id).await? {
            return Err(CoreError::NotFound {
                entity: "Video file",
                id: item_id.to_string(),
            });
        }

        let intent_path = self.intent_path(item_id);
        let intent = serde_json::to_value(PromotionIntent::new(item_id))
            .map_err(|e| CoreError::storage(&intent_path, std::io::Error::other(e)))?;
        self.documents.write(&intent_path, &intent).await?;

        let src = self.pending.media_file(item_id);
        let dst = self.finished.media_file(item_id);
        if let Err(e) = self.documents.move_file(&src, &dst).await {
            if let Err(cleanup) = self.documents.remove(&intent_path).await {
                tracing::warn!(item_id, error = %cleanup, "Failed to clear promotion intent");
            }
            return Err(e);
        }

        // On failure the intent stays behind for reconcile().
        let annotations_moved = self.move_annotations(item_id).await?;

        self.documents.remove(&intent_path).await?;

        tracing::info!(item_id, annotations_moved, "Item promoted to finished");
        Ok(PromotedItem {
            item_id: item_id.to_string(),
            annotations_moved,
        })
    }

    /// Resolve promotions left unfinished by a crash or I/O failure.
    ///
    /// Intended to run once at startup before serving requests.
    pub async fn reconcile(&self) -> Result<Vec<ReconcileOutcome>, CoreError> {
        let names = match self.documents.list_dir(&self.journal_dir).await {
            Ok(names) => names,
            Err(CoreError::Storage { source, .. }) if source.kind() == ErrorKind::NotFound => {
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let mut outcomes = Vec::new();
        for name in names {
            let Some(item_id) = name.strip_suffix(INTENT_SUFFIX) else {
                continue;
            };
            if validate_item_id(item_id).is_err() {
                continue;
            }

            let _pending_guard = self.locks.lock(PoolKind::Pending, item_id).await;
            let _finished_guard = self.locks.lock(PoolKind::Finished, item_id).await;

            let outcome = if self.pending.contains(item_id).await? {
                ReconcileOutcome::Discarded {
                    item_id: item_id.to_string(),
                }
            } else if self.finished.contains(item_id).await? {
                let annotations_moved = self.complete_annotation_move(item_id).await?;
                ReconcileOutcome::Completed {
                    item_id: item_id.to_string(),
                    annotations_moved,
                }
            } else {
                tracing::warn!(item_id, "Promotion intent found for item in neither pool");
                ReconcileOutcome::Orphaned {
                    item_id: item_id.to_string(),
                }
            };

            self.documents.remove(&self.intent_path(item_id)).await?;
            tracing::info!(?outcome, "Reconciled promotion intent");
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    /// Move the Pending annotation document, if any, next to the Finished media.
    async fn move_annotations(&self, item_id: &str) -> Result<bool, CoreError> {
        let src = self.pending.annotations().document_path(item_id);
        if !self.documents.exists(&src).await? {
            return Ok(false);
        }
        let dst = self.finished.annotations().document_path(item_id);
        self.documents.move_file(&src, &dst).await?;
        Ok(true)
    }

    /// Like [`Self::move_annotations`], but merges into a Finished document
    /// written after the media moved instead of replacing it.
    async fn complete_annotation_move(&self, item_id: &str) -> Result<bool, CoreError> {
        let src = self.pending.annotations().document_path(item_id);
        let Some(pending) = self.read_set(&src).await? else {
            return Ok(false);
        };
        let dst = self.finished.annotations().document_path(item_id);
        let Some(finished) = self.read_set(&dst).await? else {
            self.documents.move_file(&src, &dst).await?;
            return Ok(true);
        };

        let mut merged = pending;
        merged.annotations.extend(finished.annotations);
        let value = serde_json::to_value(&merged)
            .map_err(|e| CoreError::storage(&dst, std::io::Error::other(e)))?;
        self.documents.write(&dst, &value).await?;
        self.documents.remove(&src).await?;

        tracing::warn!(
            item_id,
            count = merged.annotations.len(),
            "Merged pending annotations into existing finished document"
        );
        Ok(true)
    }

    async fn read_set(&self, path: &Path) -> Result<Option<AnnotationSet>, CoreError> {
        match self.documents.read(path).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| CoreError::corrupt(path, e.to_string())),
            None => Ok(None),
        }
    }

    fn intent_path(&self, item_id: &str) -> PathBuf {
        self.journal_dir.join(intent_file_name(item_id))
    }
}
