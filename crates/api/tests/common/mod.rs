#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use clipmark_api::config::ServerConfig;
use clipmark_api::router::build_app_router;
use clipmark_api::state::AppState;
use clipmark_store::Catalog;

/// Build a test `ServerConfig` whose pools live under `dir`.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(dir: &Path) -> ServerConfig {
    let pending_dir = dir.join("videos");
    let finished_dir = pending_dir.join("Done_annotations");
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        promotion_journal_dir: finished_dir.join(".promotion-journal"),
        pending_dir,
        finished_dir,
        taxonomy_file: dir.join("annotation_classes.json"),
    }
}

/// Build the full application router over a fresh catalog in `dir`.
///
/// Returns the catalog too so tests can seed media files and inspect the
/// persisted documents directly.
pub async fn build_test_app(dir: &TempDir) -> (Router, Catalog) {
    let config = test_config(dir.path());
    let catalog = Catalog::open(&config.catalog_config()).await.unwrap();

    let state = AppState {
        catalog: catalog.clone(),
        config: Arc::new(config.clone()),
    };

    (build_app_router(state, &config), catalog)
}

/// Create a media file with `contents` in the given pool directory.
pub fn touch_media(dir: &Path, name: &str, contents: &[u8]) {
    std::fs::write(dir.join(name), contents).unwrap();
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, "GET", uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, "POST", uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, "PUT", uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, "DELETE", uri, None).await
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
