//! Clients for the remote `albums` table.
//!
//! The table is the durable source of truth; the catalog service only
//! commits local state after one of these clients confirms a write.

mod memory;
mod rest;

pub use memory::MemoryAlbumStore;
pub use rest::RestAlbumStore;

use anyhow::Result;
use async_trait::async_trait;

use crate::catalog::row::{AlbumRow, NewAlbumRow};
use crate::catalog::AlbumStatus;

/// Storage backend for the `albums` table.
#[async_trait]
pub trait AlbumStore: Send + Sync {
    /// All rows, ordered by `added_at` descending.
    async fn list_albums(&self) -> Result<Vec<AlbumRow>>;

    /// Insert one or more rows, returning them with store-assigned ids.
    async fn insert_albums(&self, rows: Vec<NewAlbumRow>) -> Result<Vec<AlbumRow>>;

    /// Partial update: set only the `status` column of the given row.
    async fn update_status(&self, id: &str, status: AlbumStatus) -> Result<()>;

    /// Delete a row by id.
    async fn delete_album(&self, id: &str) -> Result<()>;
}
