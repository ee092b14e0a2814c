//! Shared test helpers: a call-counting, fault-injecting store wrapper and
//! fixture builders.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use vinyl_vault_server::catalog::row::{AlbumRow, NewAlbumRow};
use vinyl_vault_server::catalog::{AlbumStatus, NewAlbumInput};
use vinyl_vault_server::store::{AlbumStore, MemoryAlbumStore};

/// Wraps the in-memory store, counting every remote call and optionally
/// failing all mutations. Lets tests assert that the catalog never touches
/// local state without a confirmed remote write, and that rejected inputs
/// never reach the store at all.
pub struct RecordingStore {
    inner: MemoryAlbumStore,
    failing: AtomicBool,
    calls: AtomicUsize,
}

#[allow(dead_code)] // Not every test file uses every helper
impl RecordingStore {
    pub fn new() -> Self {
        Self::wrap(MemoryAlbumStore::new())
    }

    pub fn with_rows(rows: Vec<AlbumRow>) -> Self {
        Self::wrap(MemoryAlbumStore::with_rows(rows))
    }

    fn wrap(inner: MemoryAlbumStore) -> Self {
        Self {
            inner,
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    /// Make every subsequent mutation fail with an injected error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Total number of remote calls seen, reads included.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("injected store failure");
        }
        Ok(())
    }
}

#[async_trait]
impl AlbumStore for RecordingStore {
    async fn list_albums(&self) -> Result<Vec<AlbumRow>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.inner.list_albums().await
    }

    async fn insert_albums(&self, rows: Vec<NewAlbumRow>) -> Result<Vec<AlbumRow>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.inner.insert_albums(rows).await
    }

    async fn update_status(&self, id: &str, status: AlbumStatus) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.inner.update_status(id, status).await
    }

    async fn delete_album(&self, id: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.inner.delete_album(id).await
    }
}

#[allow(dead_code)]
pub fn row(id: &str, title: &str, artist: &str, status: &str, added_at: &str) -> AlbumRow {
    AlbumRow {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        genre: "Rock".to_string(),
        year: 1970,
        spine_color: "#112233".to_string(),
        description: None,
        status: Some(status.to_string()),
        added_at: added_at.to_string(),
    }
}

#[allow(dead_code)]
pub fn input(title: &str, artist: &str, year: &str, status: AlbumStatus) -> NewAlbumInput {
    NewAlbumInput {
        title: title.to_string(),
        artist: artist.to_string(),
        genre: "Rock".to_string(),
        year: year.to_string(),
        spine_color: "#112233".to_string(),
        status,
    }
}
