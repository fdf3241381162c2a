//! Handlers for pool membership.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::handlers::parse_pool;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /pools/{pool}/items
///
/// List the media items currently in a pool.
pub async fn list_items(
    State(state): State<AppState>,
    Path(pool): Path<String>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_pool(&pool)?;
    let items = state.catalog.pool(kind).list_items().await?;
    Ok(Json(DataResponse { data: items }))
}
