use std::sync::Arc;

use clipmark_store::Catalog;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Both pools, promotion and taxonomy.
    pub catalog: Catalog,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
