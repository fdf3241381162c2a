use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use clipmark_core::pool::PoolKind;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether both pool directories can be listed.
    pub storage_healthy: bool,
}

/// GET /health -- returns service and storage health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut storage_healthy = true;
    for kind in [PoolKind::Pending, PoolKind::Finished] {
        if let Err(e) = state.catalog.pool(kind).list_items().await {
            tracing::warn!(pool = %kind, error = %e, "Pool directory unreadable");
            storage_healthy = false;
        }
    }

    let status = if storage_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        storage_healthy,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
