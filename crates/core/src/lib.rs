//! Domain types and rules for the clipmark annotation service.
//!
//! This crate does no I/O. Persistence lives in `clipmark-store`.

pub mod annotation;
pub mod error;
pub mod media;
pub mod pool;
pub mod promotion;
pub mod taxonomy;
pub mod types;
