//! Per-item mutual exclusion for read-modify-write cycles.
//!
//! Every mutation of an item's documents holds the lock for `(pool, item_id)`
//! from the read until the write completes. Different items never contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::OwnedMutexGuard;

use clipmark_core::pool::PoolKind;

/// Table size above which idle entries are dropped on the next acquire.
const PRUNE_THRESHOLD: usize = 1024;

type LockKey = (PoolKind, String);

/// Lock table keyed by `(pool, item_id)`.
#[derive(Debug, Default)]
pub struct ItemLocks {
    table: Mutex<HashMap<LockKey, Arc<tokio::sync::Mutex<()>>>>,
}

impl ItemLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for and take the lock on `item_id` in `pool`.
    pub async fn lock(&self, pool: PoolKind, item_id: &str) -> OwnedMutexGuard<()> {
        let entry = {
            let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
            if table.len() >= PRUNE_THRESHOLD {
                // Only the table holds a reference to an idle entry.
                table.retain(|_, m| Arc::strong_count(m) > 1);
            }
            Arc::clone(table.entry((pool, item_id.to_string())).or_default())
        };
        entry.lock_owned().await
    }

    /// Number of entries currently in the table.
    pub fn len(&self) -> usize {
        self.table.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
