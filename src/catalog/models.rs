//! Domain models for the record vault.
//!
//! These are the application-side shapes: JSON serialization uses camelCase
//! field names to match what the frontend works with. The snake_case wire
//! shape of the remote table lives in [`super::row`].

use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Where a record currently lives: on the shelf or still wanted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlbumStatus {
    #[default]
    Collection,
    Wishlist,
}

impl AlbumStatus {
    /// Convert from the stored column value.
    ///
    /// Rows written before the wishlist feature existed carry no status;
    /// those count as part of the collection.
    pub fn from_db_str(s: Option<&str>) -> Self {
        match s {
            Some("wishlist") => AlbumStatus::Wishlist,
            _ => AlbumStatus::Collection,
        }
    }

    /// Convert to the stored column value.
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AlbumStatus::Collection => "collection",
            AlbumStatus::Wishlist => "wishlist",
        }
    }
}

/// A record in the vault.
///
/// `id` is assigned by the remote store at insert time and never changes.
/// `description` is only ever filled in through AI enrichment.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub year: i32,
    pub spine_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub added_at: String,
    pub status: AlbumStatus,
}

/// Creation payload as it arrives from the add-record form.
///
/// `year` is raw form text; it gets parsed when the record is added, falling
/// back to the current calendar year.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlbumInput {
    pub title: String,
    pub artist: String,
    pub genre: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub spine_color: String,
    #[serde(default)]
    pub status: AlbumStatus,
}

/// A suggested record from the discovery crate. Never persisted as-is.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub year: i32,
    pub spine_color: String,
    pub reason: String,
}

impl Recommendation {
    /// Accepted suggestions always land on the wishlist.
    pub fn into_input(self) -> NewAlbumInput {
        NewAlbumInput {
            title: self.title,
            artist: self.artist,
            genre: self.genre,
            year: self.year.to_string(),
            spine_color: self.spine_color,
            status: AlbumStatus::Wishlist,
        }
    }
}

/// Canonical album metadata as returned by the enrichment service.
///
/// The service may correct spelling and capitalization, so `correct_title`
/// and `correct_artist` can differ from what was asked for.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlbumMetadata {
    pub correct_title: String,
    pub correct_artist: String,
    pub genre: String,
    pub year: i32,
    pub description: String,
    pub spine_color: String,
}

/// Current calendar year, the fallback for unparsable year input.
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}
