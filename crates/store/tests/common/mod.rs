#![allow(dead_code)]

use std::path::Path;

use clipmark_store::{Catalog, CatalogConfig};
use tempfile::TempDir;

/// A catalog rooted in a fresh temp directory, laid out like a deployment:
/// the finished pool nested inside the pending pool.
pub struct Fixture {
    pub dir: TempDir,
    pub config: CatalogConfig,
    pub catalog: Catalog,
}

pub async fn fixture() -> Fixture {
    let dir = tempfile::tempdir().expect("create temp dir");
    let pending = dir.path().join("videos");
    let config = CatalogConfig::new(
        &pending,
        pending.join("Done_annotations"),
        dir.path().join("annotation_classes.json"),
    );
    let catalog = Catalog::open(&config).await.expect("open catalog");
    Fixture {
        dir,
        config,
        catalog,
    }
}

/// Drop a fake media file named `name` into `dir`.
pub fn touch_media(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), b"\x00\x00\x00\x18ftypmp42").expect("write media");
}

/// Parse the JSON document at `path` straight from disk.
pub fn read_json(path: &Path) -> serde_json::Value {
    let bytes = std::fs::read(path).expect("read document");
    serde_json::from_slice(&bytes).expect("parse document")
}
