//! Request handlers for pools, annotations, promotion and taxonomy.
//!
//! Handlers delegate to the [`clipmark_store::Catalog`] in [`AppState`] and
//! map errors via [`AppError`].
//!
//! [`AppState`]: crate::state::AppState
//! [`AppError`]: crate::error::AppError

pub mod annotation;
pub mod media;
pub mod pool;
pub mod promotion;
pub mod taxonomy;

use clipmark_core::pool::PoolKind;

use crate::error::AppResult;

/// Parse the `{pool}` path segment.
pub(crate) fn parse_pool(pool: &str) -> AppResult<PoolKind> {
    Ok(PoolKind::from_str(pool)?)
}
