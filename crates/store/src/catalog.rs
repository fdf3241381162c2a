//! Wiring of both pools, the lifecycle manager and the taxonomy registry.

use std::path::PathBuf;
use std::sync::Arc;

use clipmark_core::error::CoreError;
use clipmark_core::pool::PoolKind;

use crate::document::{DocumentStore, FsDocumentStore};
use crate::lifecycle::LifecycleManager;
use crate::locks::ItemLocks;
use crate::pool::Pool;
use crate::taxonomy::TaxonomyRegistry;

/// Name of the promotion journal directory inside the finished pool.
pub const DEFAULT_JOURNAL_DIR_NAME: &str = ".promotion-journal";

/// Filesystem locations backing a [`Catalog`].
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub pending_dir: PathBuf,
    pub finished_dir: PathBuf,
    pub taxonomy_file: PathBuf,
    pub journal_dir: PathBuf,
}

impl CatalogConfig {
    /// Config with the journal under `<finished_dir>/.promotion-journal`.
    pub fn new(
        pending_dir: impl Into<PathBuf>,
        finished_dir: impl Into<PathBuf>,
        taxonomy_file: impl Into<PathBuf>,
    ) -> Self {
        let finished_dir = finished_dir.into();
        Self {
            pending_dir: pending_dir.into(),
            journal_dir: finished_dir.join(DEFAULT_JOURNAL_DIR_NAME),
            finished_dir,
            taxonomy_file: taxonomy_file.into(),
        }
    }
}

/// Entry point to the annotation store: both pools plus promotion and taxonomy.
///
/// Cheap to clone; all parts share one document store and one lock table.
#[derive(Clone)]
pub struct Catalog {
    pending: Pool,
    finished: Pool,
    lifecycle: LifecycleManager,
    taxonomy: TaxonomyRegistry,
}

impl Catalog {
    /// Create the pool and journal directories if needed and build the catalog
    /// on the local filesystem.
    pub async fn open(config: &CatalogConfig) -> Result<Self, CoreError> {
        for dir in [&config.pending_dir, &config.finished_dir, &config.journal_dir] {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| CoreError::storage(dir, e))?;
        }
        Ok(Self::with_documents(config, Arc::new(FsDocumentStore::new())))
    }

    /// Build the catalog over an arbitrary [`DocumentStore`] without touching storage.
    pub fn with_documents(config: &CatalogConfig, documents: Arc<dyn DocumentStore>) -> Self {
        let locks = Arc::new(ItemLocks::new());

        let pending = Pool::new(
            PoolKind::Pending,
            config.pending_dir.clone(),
            Arc::clone(&documents),
            Arc::clone(&locks),
        );
        let finished = Pool::new(
            PoolKind::Finished,
            config.finished_dir.clone(),
            Arc::clone(&documents),
            Arc::clone(&locks),
        );
        let lifecycle = LifecycleManager::new(
            pending.clone(),
            finished.clone(),
            config.journal_dir.clone(),
            Arc::clone(&documents),
            locks,
        );
        let taxonomy = TaxonomyRegistry::new(config.taxonomy_file.clone(), documents);

        Self {
            pending,
            finished,
            lifecycle,
            taxonomy,
        }
    }

    pub fn pool(&self, kind: PoolKind) -> &Pool {
        match kind {
            PoolKind::Pending => &self.pending,
            PoolKind::Finished => &self.finished,
        }
    }

    pub fn lifecycle(&self) -> &LifecycleManager {
        &self.lifecycle
    }

    pub fn taxonomy(&self) -> &TaxonomyRegistry {
        &self.taxonomy
    }
}
