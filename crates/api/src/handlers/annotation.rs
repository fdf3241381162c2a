//! Handlers for per-item annotations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::handlers::parse_pool;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of an append request. A missing `annotation` is reported by the store.
#[derive(Debug, Deserialize)]
pub struct AppendAnnotationRequest {
    #[serde(default)]
    pub annotation: Value,
}

/// GET /pools/{pool}/items/{item_id}/annotations
///
/// Returns the item's annotation set, empty if nothing was saved yet.
pub async fn get_annotations(
    State(state): State<AppState>,
    Path((pool, item_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_pool(&pool)?;
    let set = state.catalog.pool(kind).annotations().get(&item_id).await?;
    Ok(Json(DataResponse { data: set }))
}

/// POST /pools/{pool}/items/{item_id}/annotations
///
/// Append one annotation and return the full resulting set.
pub async fn append_annotation(
    State(state): State<AppState>,
    Path((pool, item_id)): Path<(String, String)>,
    AppJson(input): AppJson<AppendAnnotationRequest>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_pool(&pool)?;
    let set = state
        .catalog
        .pool(kind)
        .annotations()
        .append(&item_id, input.annotation)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: set })))
}

/// DELETE /pools/{pool}/items/{item_id}/annotations/{index}
///
/// Delete the annotation at `index` in ascending `start_frame` order and
/// return the remaining annotations.
pub async fn delete_annotation(
    State(state): State<AppState>,
    Path((pool, item_id, index)): Path<(String, String, String)>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_pool(&pool)?;
    let remaining = state
        .catalog
        .pool(kind)
        .annotations()
        .delete_at(&item_id, &Value::String(index))
        .await?;
    Ok(Json(DataResponse { data: remaining }))
}
