//! The in-memory catalog and its synchronization against the remote store.
//!
//! Every mutation is remote-then-local: the remote call must succeed before
//! local state changes, so the catalog never runs ahead of what the store
//! has confirmed. It may lag behind only while a single call is in flight.
//! There is no per-id serialization; two mutations racing on the same album
//! resolve in whatever order the remote calls complete.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use crate::store::AlbumStore;

use super::dedup::is_duplicate;
use super::error::CatalogError;
use super::models::{current_year, Album, AlbumStatus, NewAlbumInput};
use super::row::NewAlbumRow;
use super::seed::SEED_ALBUMS;

/// Fallback spine color when the input leaves it blank.
pub const DEFAULT_SPINE_COLOR: &str = "#8B4513";

pub struct CatalogService {
    store: Arc<dyn AlbumStore>,
    albums: RwLock<Vec<Album>>,
    loading: AtomicBool,
}

impl CatalogService {
    pub fn new(store: Arc<dyn AlbumStore>) -> Self {
        Self {
            store,
            albums: RwLock::new(Vec::new()),
            loading: AtomicBool::new(false),
        }
    }

    /// True while a [`refresh`](Self::refresh) is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Relaxed)
    }

    /// Snapshot of the catalog, newest first.
    pub async fn albums(&self) -> Vec<Album> {
        self.albums.read().await.clone()
    }

    pub async fn albums_with_status(&self, status: AlbumStatus) -> Vec<Album> {
        self.albums
            .read()
            .await
            .iter()
            .filter(|album| album.status == status)
            .cloned()
            .collect()
    }

    /// `(title, artist)` pairs of everything on the shelf, fed to the
    /// recommendation prompt.
    pub async fn owned_pairs(&self) -> Vec<(String, String)> {
        self.albums
            .read()
            .await
            .iter()
            .filter(|album| album.status == AlbumStatus::Collection)
            .map(|album| (album.title.clone(), album.artist.clone()))
            .collect()
    }

    pub async fn count(&self) -> usize {
        self.albums.read().await.len()
    }

    /// Reload the catalog from the remote store, replacing local state.
    ///
    /// An empty table triggers seeding with the built-in starter records,
    /// followed by a single re-list so that ids and timestamps are the ones
    /// the store actually persisted rather than client guesses.
    pub async fn refresh(&self) -> Result<Vec<Album>, CatalogError> {
        self.loading.store(true, Ordering::Relaxed);
        let result = self.refresh_inner().await;
        self.loading.store(false, Ordering::Relaxed);
        result
    }

    async fn refresh_inner(&self) -> Result<Vec<Album>, CatalogError> {
        let mut rows = self.store.list_albums().await?;
        if rows.is_empty() {
            info!(
                "Remote table is empty, seeding {} starter records",
                SEED_ALBUMS.len()
            );
            self.store.insert_albums(seed_rows()).await?;
            rows = self.store.list_albums().await?;
        }
        let albums: Vec<Album> = rows.into_iter().map(Album::from).collect();
        *self.albums.write().await = albums.clone();
        Ok(albums)
    }

    /// Add a record. Duplicates are rejected against the in-memory catalog
    /// before any remote call is made; on remote failure local state is
    /// untouched and the error surfaces to the caller, with no retry.
    pub async fn add(&self, input: NewAlbumInput) -> Result<Album, CatalogError> {
        if input.title.trim().is_empty() {
            return Err(CatalogError::MissingField("title"));
        }
        if input.artist.trim().is_empty() {
            return Err(CatalogError::MissingField("artist"));
        }
        if input.genre.trim().is_empty() {
            return Err(CatalogError::MissingField("genre"));
        }

        {
            let albums = self.albums.read().await;
            if is_duplicate(&albums, &input.artist, &input.title) {
                return Err(CatalogError::Duplicate {
                    title: input.title,
                    artist: input.artist,
                });
            }
        }

        let year = input
            .year
            .trim()
            .parse::<i32>()
            .unwrap_or_else(|_| current_year());
        let spine_color = if input.spine_color.trim().is_empty() {
            DEFAULT_SPINE_COLOR.to_string()
        } else {
            input.spine_color
        };

        let row = NewAlbumRow {
            title: input.title,
            artist: input.artist,
            genre: input.genre,
            year,
            spine_color,
            status: input.status.to_db_str().to_string(),
            added_at: Utc::now().to_rfc3339(),
        };

        let mut inserted = self.store.insert_albums(vec![row]).await?;
        if inserted.is_empty() {
            return Err(CatalogError::Store(anyhow::anyhow!(
                "store returned no inserted rows"
            )));
        }
        let album = Album::from(inserted.remove(0));

        self.albums.write().await.insert(0, album.clone());
        Ok(album)
    }

    /// Delete a record. Remote first; the local entry only goes away once
    /// the store has confirmed.
    pub async fn remove(&self, id: &str) -> Result<(), CatalogError> {
        if !self.contains(id).await {
            return Err(CatalogError::NotFound(id.to_string()));
        }

        self.store.delete_album(id).await?;

        self.albums.write().await.retain(|album| album.id != id);
        Ok(())
    }

    /// Promote a wishlist record to the collection. Patches only the status
    /// field of the matching local record, and only after the remote update
    /// succeeded.
    pub async fn move_to_collection(&self, id: &str) -> Result<Album, CatalogError> {
        if !self.contains(id).await {
            return Err(CatalogError::NotFound(id.to_string()));
        }

        self.store
            .update_status(id, AlbumStatus::Collection)
            .await?;

        let mut albums = self.albums.write().await;
        let album = albums
            .iter_mut()
            .find(|album| album.id == id)
            // Removed by a racing delete while the update was in flight.
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        album.status = AlbumStatus::Collection;
        Ok(album.clone())
    }

    async fn contains(&self, id: &str) -> bool {
        self.albums.read().await.iter().any(|album| album.id == id)
    }
}

fn seed_rows() -> Vec<NewAlbumRow> {
    let now = Utc::now().to_rfc3339();
    SEED_ALBUMS
        .iter()
        .map(|seed| NewAlbumRow {
            title: seed.title.to_string(),
            artist: seed.artist.to_string(),
            genre: seed.genre.to_string(),
            year: seed.year,
            spine_color: seed.spine_color.to_string(),
            status: AlbumStatus::Collection.to_db_str().to_string(),
            added_at: now.clone(),
        })
        .collect()
}
