//! The record catalog: domain models, the remote-synchronized in-memory
//! state, and duplicate detection.

pub mod dedup;
mod error;
mod models;
pub mod row;
pub mod seed;
mod service;

pub use error::CatalogError;
pub use models::{current_year, Album, AlbumMetadata, AlbumStatus, NewAlbumInput, Recommendation};
pub use service::{CatalogService, DEFAULT_SPINE_COLOR};
