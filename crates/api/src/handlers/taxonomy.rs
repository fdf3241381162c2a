//! Handlers for the label-class taxonomy.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReplaceTaxonomyRequest {
    pub classes: Option<Vec<String>>,
}

/// GET /taxonomy
pub async fn get_taxonomy(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let classes = state.catalog.taxonomy().load().await?;
    Ok(Json(DataResponse { data: classes }))
}

/// PUT /taxonomy
///
/// Replace the whole class list. The list is stored exactly as sent.
pub async fn replace_taxonomy(
    State(state): State<AppState>,
    AppJson(input): AppJson<ReplaceTaxonomyRequest>,
) -> AppResult<impl IntoResponse> {
    let classes = state.catalog.taxonomy().replace_all(input.classes).await?;
    Ok(Json(DataResponse { data: classes }))
}
