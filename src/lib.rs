//! Vinyl Vault Catalog Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod catalog;
pub mod enrichment;
pub mod server;
pub mod store;

// Re-export commonly used types for convenience
pub use catalog::{CatalogError, CatalogService};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
pub use store::{AlbumStore, MemoryAlbumStore, RestAlbumStore};
