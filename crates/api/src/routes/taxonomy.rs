//! Route definitions for the label-class taxonomy.

use axum::routing::get;
use axum::Router;

use crate::handlers::taxonomy;
use crate::state::AppState;

/// Taxonomy routes, merged at the `/api/v1` root.
///
/// ```text
/// GET    /taxonomy      get_taxonomy
/// PUT    /taxonomy      replace_taxonomy
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/taxonomy",
        get(taxonomy::get_taxonomy).put(taxonomy::replace_taxonomy),
    )
}
