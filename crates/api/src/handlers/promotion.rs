//! Handler for promoting an item from Pending to Finished.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /items/{item_id}/promote
///
/// Move the media file and its annotations into the finished pool.
pub async fn promote_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let promoted = state.catalog.lifecycle().promote(&item_id).await?;
    Ok(Json(DataResponse { data: promoted }))
}
