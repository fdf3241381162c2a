//! Integration tests for pool listing, media streaming and promotion.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::{body_bytes, body_json, get, post_json, read_json, touch_media};
use serde_json::json;
use tempfile::TempDir;
use tower::ServiceExt;

use clipmark_core::pool::PoolKind;

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_returns_sorted_media_only() {
    let dir = TempDir::new().unwrap();
    let (app, catalog) = common::build_test_app(&dir).await;
    let pending = catalog.pool(PoolKind::Pending).dir().to_path_buf();

    touch_media(&pending, "b.mp4", b"");
    touch_media(&pending, "a.mov", b"");
    touch_media(&pending, "a.mov.json", b"{}");
    touch_media(&pending, "notes.txt", b"");

    let response = get(app, "/api/v1/pools/pending/items").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!(["a.mov", "b.mp4"]));
}

#[tokio::test]
async fn finished_pool_is_not_listed_as_pending() {
    let dir = TempDir::new().unwrap();
    let (app, catalog) = common::build_test_app(&dir).await;
    touch_media(catalog.pool(PoolKind::Finished).dir(), "done.mp4", b"");

    let pending = body_json(get(app.clone(), "/api/v1/pools/pending/items").await).await;
    assert_eq!(pending["data"], json!([]));

    let finished = body_json(get(app, "/api/v1/pools/finished/items").await).await;
    assert_eq!(finished["data"], json!(["done.mp4"]));
}

#[tokio::test]
async fn list_unknown_pool_returns_400() {
    let dir = TempDir::new().unwrap();
    let (app, _) = common::build_test_app(&dir).await;

    let response = get(app, "/api/v1/pools/everything/items").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Media streaming
// ---------------------------------------------------------------------------

#[tokio::test]
async fn media_is_served_in_full() {
    let dir = TempDir::new().unwrap();
    let (app, catalog) = common::build_test_app(&dir).await;
    touch_media(catalog.pool(PoolKind::Pending).dir(), "clip.mp4", b"0123456789");

    let response = get(app, "/api/v1/pools/pending/items/clip.mp4/media").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "video/mp4");
    assert_eq!(response.headers()[header::ACCEPT_RANGES], "bytes");
    assert_eq!(body_bytes(response).await, b"0123456789");
}

#[tokio::test]
async fn media_range_returns_partial_content() {
    let dir = TempDir::new().unwrap();
    let (app, catalog) = common::build_test_app(&dir).await;
    touch_media(catalog.pool(PoolKind::Pending).dir(), "clip.mp4", b"0123456789");

    let request = Request::builder()
        .uri("/api/v1/pools/pending/items/clip.mp4/media")
        .header(header::RANGE, "bytes=2-5")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.headers()[header::CONTENT_RANGE], "bytes 2-5/10");
    assert_eq!(body_bytes(response).await, b"2345");
}

#[tokio::test]
async fn media_range_past_end_returns_416() {
    let dir = TempDir::new().unwrap();
    let (app, catalog) = common::build_test_app(&dir).await;
    touch_media(catalog.pool(PoolKind::Pending).dir(), "clip.mp4", b"0123");

    let request = Request::builder()
        .uri("/api/v1/pools/pending/items/clip.mp4/media")
        .header(header::RANGE, "bytes=10-")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::RANGE_NOT_SATISFIABLE);
    assert_eq!(response.headers()[header::CONTENT_RANGE], "bytes */4");
}

#[tokio::test]
async fn missing_media_returns_404() {
    let dir = TempDir::new().unwrap();
    let (app, _) = common::build_test_app(&dir).await;

    let response = get(app, "/api/v1/pools/pending/items/ghost.mp4/media").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Video file 'ghost.mp4' not found");
}

#[tokio::test]
async fn annotation_document_is_not_served_as_media() {
    let dir = TempDir::new().unwrap();
    let (app, catalog) = common::build_test_app(&dir).await;
    touch_media(catalog.pool(PoolKind::Pending).dir(), "clip.mp4.json", b"{}");

    let response = get(app, "/api/v1/pools/pending/items/clip.mp4.json/media").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Promotion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn promote_moves_media_and_annotations() {
    let dir = TempDir::new().unwrap();
    let (app, catalog) = common::build_test_app(&dir).await;
    let pending = catalog.pool(PoolKind::Pending).dir().to_path_buf();
    let finished = catalog.pool(PoolKind::Finished).dir().to_path_buf();
    touch_media(&pending, "clip.mp4", b"video");

    post_json(
        app.clone(),
        "/api/v1/pools/pending/items/clip.mp4/annotations",
        json!({"annotation": {"start_frame": 7}}),
    )
    .await;

    let response = post_json(app.clone(), "/api/v1/items/clip.mp4/promote", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"],
        json!({"item_id": "clip.mp4", "annotations_moved": true})
    );

    assert!(!pending.join("clip.mp4").exists());
    assert!(!pending.join("clip.mp4.json").exists());
    assert!(finished.join("clip.mp4").exists());
    assert_eq!(
        read_json(&finished.join("clip.mp4.json"))["annotations"],
        json!([{"start_frame": 7}])
    );

    let listed = body_json(get(app, "/api/v1/pools/finished/items").await).await;
    assert_eq!(listed["data"], json!(["clip.mp4"]));
}

#[tokio::test]
async fn promote_without_annotations_moves_media_only() {
    let dir = TempDir::new().unwrap();
    let (app, catalog) = common::build_test_app(&dir).await;
    touch_media(catalog.pool(PoolKind::Pending).dir(), "clip.mp4", b"video");

    let response = post_json(app, "/api/v1/items/clip.mp4/promote", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["annotations_moved"], false);
    assert!(catalog.pool(PoolKind::Finished).dir().join("clip.mp4").exists());
}

#[tokio::test]
async fn promote_unknown_item_returns_404() {
    let dir = TempDir::new().unwrap();
    let (app, _) = common::build_test_app(&dir).await;

    let response = post_json(app, "/api/v1/items/ghost.mp4/promote", json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn promote_twice_returns_404_the_second_time() {
    let dir = TempDir::new().unwrap();
    let (app, catalog) = common::build_test_app(&dir).await;
    touch_media(catalog.pool(PoolKind::Pending).dir(), "clip.mp4", b"video");

    let first = post_json(app.clone(), "/api/v1/items/clip.mp4/promote", json!({})).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_json(app, "/api/v1/items/clip.mp4/promote", json!({})).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}
