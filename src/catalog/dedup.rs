//! Duplicate detection for incoming records.

use super::models::Album;

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// True when `(artist, title)` already exists in the catalog, compared
/// case-insensitively with surrounding whitespace ignored. Status does not
/// matter: a wishlist entry blocks re-adding the same record.
///
/// This is a coarse match: remastered or deluxe editions whose titles differ
/// by any character count as distinct records.
pub fn is_duplicate(albums: &[Album], artist: &str, title: &str) -> bool {
    let artist = normalize(artist);
    let title = normalize(title);
    albums
        .iter()
        .any(|album| normalize(&album.artist) == artist && normalize(&album.title) == title)
}
