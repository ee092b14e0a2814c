//! In-process album store.
//!
//! Backs the server when no remote table is configured, and the tests.
//! Mirrors the remote contract: ids are assigned at insert time and listing
//! is newest-first by `added_at`.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

use crate::catalog::row::{AlbumRow, NewAlbumRow};
use crate::catalog::AlbumStatus;

use super::AlbumStore;

#[derive(Default)]
pub struct MemoryAlbumStore {
    rows: Mutex<Vec<AlbumRow>>,
}

impl MemoryAlbumStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the table already populated.
    pub fn with_rows(rows: Vec<AlbumRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }
}

#[async_trait]
impl AlbumStore for MemoryAlbumStore {
    async fn list_albums(&self) -> Result<Vec<AlbumRow>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.added_at.cmp(&a.added_at));
        Ok(rows)
    }

    async fn insert_albums(&self, new_rows: Vec<NewAlbumRow>) -> Result<Vec<AlbumRow>> {
        let inserted: Vec<AlbumRow> = new_rows
            .into_iter()
            .map(|row| AlbumRow {
                id: Uuid::new_v4().to_string(),
                title: row.title,
                artist: row.artist,
                genre: row.genre,
                year: row.year,
                spine_color: row.spine_color,
                description: None,
                status: Some(row.status),
                added_at: row.added_at,
            })
            .collect();

        self.rows.lock().unwrap().extend(inserted.iter().cloned());
        Ok(inserted)
    }

    async fn update_status(&self, id: &str, status: AlbumStatus) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| anyhow::anyhow!("no row with id {}", id))?;
        row.status = Some(status.to_db_str().to_string());
        Ok(())
    }

    async fn delete_album(&self, id: &str) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            anyhow::bail!("no row with id {}", id);
        }
        Ok(())
    }
}
