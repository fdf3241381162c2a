pub mod health;
pub mod pool;
pub mod taxonomy;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /pools/{pool}/items                                  list (pending | finished)
/// /pools/{pool}/items/{item_id}/media                  media stream (Range aware)
/// /pools/{pool}/items/{item_id}/annotations            get, append
/// /pools/{pool}/items/{item_id}/annotations/{index}    delete by sorted index
///
/// /items/{item_id}/promote                             pending -> finished (POST)
///
/// /taxonomy                                            get, replace (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/pools", pool::router())
        .nest("/items", pool::lifecycle_router())
        .merge(taxonomy::router())
}
