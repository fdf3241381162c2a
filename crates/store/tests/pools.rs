//! Integration tests for pool membership and media lookup.

mod common;

use assert_matches::assert_matches;
use clipmark_core::error::CoreError;
use clipmark_core::pool::PoolKind;
use common::{fixture, touch_media};

#[tokio::test]
async fn list_items_filters_by_media_extension() {
    let fx = fixture().await;
    let pending = fx.catalog.pool(PoolKind::Pending);
    for name in ["b.mov", "a.mp4", "c.mkv", "d.avi", "notes.txt", "a.mp4.json", "e.MP4"] {
        touch_media(pending.dir(), name);
    }

    let items = pending.list_items().await.unwrap();

    assert_eq!(items, vec!["a.mp4", "b.mov", "c.mkv", "d.avi"]);
}

#[tokio::test]
async fn list_items_does_not_recurse_into_finished_pool() {
    let fx = fixture().await;
    touch_media(fx.catalog.pool(PoolKind::Pending).dir(), "open.mp4");
    touch_media(fx.catalog.pool(PoolKind::Finished).dir(), "done.mp4");

    let pending = fx.catalog.pool(PoolKind::Pending).list_items().await.unwrap();
    let finished = fx.catalog.pool(PoolKind::Finished).list_items().await.unwrap();

    assert_eq!(pending, vec!["open.mp4"]);
    assert_eq!(finished, vec!["done.mp4"]);
}

#[tokio::test]
async fn empty_pool_lists_nothing() {
    let fx = fixture().await;
    assert!(fx.catalog.pool(PoolKind::Finished).list_items().await.unwrap().is_empty());
}

#[tokio::test]
async fn media_path_resolves_existing_item() {
    let fx = fixture().await;
    let pending = fx.catalog.pool(PoolKind::Pending);
    touch_media(pending.dir(), "clip.mp4");

    let path = pending.media_path("clip.mp4").await.unwrap();

    assert_eq!(path, pending.dir().join("clip.mp4"));
    assert!(pending.contains("clip.mp4").await.unwrap());
}

#[tokio::test]
async fn media_path_for_absent_item_is_not_found() {
    let fx = fixture().await;

    assert_matches!(
        fx.catalog.pool(PoolKind::Pending).media_path("missing.mp4").await,
        Err(CoreError::NotFound { .. })
    );
}

#[tokio::test]
async fn media_path_ignores_non_media_files() {
    let fx = fixture().await;
    let pending = fx.catalog.pool(PoolKind::Pending);
    touch_media(pending.dir(), "readme.txt");

    assert_matches!(
        pending.media_path("readme.txt").await,
        Err(CoreError::NotFound { .. })
    );
}

#[tokio::test]
async fn media_path_rejects_traversal() {
    let fx = fixture().await;

    assert_matches!(
        fx.catalog.pool(PoolKind::Finished).media_path("../clip.mp4").await,
        Err(CoreError::Validation(_))
    );
}
