//! File-backed annotation store.
//!
//! Every operation re-reads its document at the start and rewrites it in
//! full at the end; nothing is cached between calls. Mutations of one item
//! are serialized through [`locks::ItemLocks`].

pub mod annotations;
pub mod catalog;
pub mod document;
pub mod lifecycle;
pub mod locks;
pub mod pool;
pub mod taxonomy;

pub use annotations::AnnotationStore;
pub use catalog::{Catalog, CatalogConfig};
pub use document::{DocumentStore, FsDocumentStore};
pub use lifecycle::{LifecycleManager, ReconcileOutcome};
pub use locks::ItemLocks;
pub use pool::Pool;
pub use taxonomy::TaxonomyRegistry;
