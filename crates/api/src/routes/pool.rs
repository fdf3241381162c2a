//! Route definitions for pool-scoped items, media and annotations.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{annotation, media, pool, promotion};
use crate::state::AppState;

/// Pool-scoped item routes, nested under `/pools`.
///
/// ```text
/// GET    /{pool}/items                                   list_items
/// GET    /{pool}/items/{item_id}/media                   stream_media
/// GET    /{pool}/items/{item_id}/annotations             get_annotations
/// POST   /{pool}/items/{item_id}/annotations             append_annotation
/// DELETE /{pool}/items/{item_id}/annotations/{index}     delete_annotation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{pool}/items", get(pool::list_items))
        .route("/{pool}/items/{item_id}/media", get(media::stream_media))
        .route(
            "/{pool}/items/{item_id}/annotations",
            get(annotation::get_annotations).post(annotation::append_annotation),
        )
        .route(
            "/{pool}/items/{item_id}/annotations/{index}",
            delete(annotation::delete_annotation),
        )
}

/// Item lifecycle routes, nested under `/items`.
///
/// ```text
/// POST   /{item_id}/promote                              promote_item
/// ```
pub fn lifecycle_router() -> Router<AppState> {
    Router::new().route("/{item_id}/promote", post(promotion::promote_item))
}
