//! Wire shape of the remote `albums` table.
//!
//! The row store speaks snake_case columns while the application and its
//! JSON API speak camelCase. The conversions here are structural renaming
//! only; deeper validation belongs to the caller.

use serde::{Deserialize, Serialize};

use super::models::{Album, AlbumStatus};

/// A row as returned by the remote `albums` table.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AlbumRow {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub year: i32,
    pub spine_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional on the wire: rows predating the wishlist feature have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub added_at: String,
}

/// An insert payload. The store assigns `id`; `added_at` is stamped by the
/// writer, not the store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewAlbumRow {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub year: i32,
    pub spine_color: String,
    pub status: String,
    pub added_at: String,
}

impl From<AlbumRow> for Album {
    fn from(row: AlbumRow) -> Self {
        Album {
            id: row.id,
            title: row.title,
            artist: row.artist,
            genre: row.genre,
            year: row.year,
            spine_color: row.spine_color,
            description: row.description,
            status: AlbumStatus::from_db_str(row.status.as_deref()),
            added_at: row.added_at,
        }
    }
}

impl From<Album> for AlbumRow {
    fn from(album: Album) -> Self {
        AlbumRow {
            id: album.id,
            title: album.title,
            artist: album.artist,
            genre: album.genre,
            year: album.year,
            spine_color: album.spine_color,
            description: album.description,
            status: Some(album.status.to_db_str().to_string()),
            added_at: album.added_at,
        }
    }
}
