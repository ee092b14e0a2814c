//! Catalog service behavior against store doubles: remote-then-local
//! ordering, duplicate rejection, seeding, and refresh ordering.

mod common;

use std::sync::Arc;

use vinyl_vault_server::catalog::{
    current_year, AlbumStatus, CatalogError, CatalogService, DEFAULT_SPINE_COLOR,
};
use vinyl_vault_server::store::AlbumStore;

use common::{input, row, RecordingStore};

#[tokio::test]
async fn add_uses_store_assigned_id_and_prepends() {
    let store = Arc::new(RecordingStore::new());
    let catalog = CatalogService::new(store.clone());

    let first = catalog
        .add(input("OK Computer", "Radiohead", "1997", AlbumStatus::Collection))
        .await
        .unwrap();
    assert!(!first.id.is_empty());
    assert_eq!(first.year, 1997);
    assert_eq!(first.status, AlbumStatus::Collection);
    assert!(!first.added_at.is_empty());

    let second = catalog
        .add(input("Kid A", "Radiohead", "2000", AlbumStatus::Wishlist))
        .await
        .unwrap();

    // Newest addition sits at the front.
    let albums = catalog.albums().await;
    assert_eq!(albums.len(), 2);
    assert_eq!(albums[0].id, second.id);
    assert_eq!(albums[1].id, first.id);
}

#[tokio::test]
async fn add_rejects_duplicates_without_remote_call() {
    let store = Arc::new(RecordingStore::new());
    let catalog = CatalogService::new(store.clone());

    catalog
        .add(input("OK Computer", "Radiohead", "1997", AlbumStatus::Collection))
        .await
        .unwrap();
    let calls_after_add = store.call_count();

    let err = catalog
        .add(input("ok computer ", " radiohead", "1997", AlbumStatus::Wishlist))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Duplicate { .. }));
    assert_eq!(store.call_count(), calls_after_add);
    assert_eq!(catalog.count().await, 1);
}

#[tokio::test]
async fn add_rejects_missing_fields_without_remote_call() {
    let store = Arc::new(RecordingStore::new());
    let catalog = CatalogService::new(store.clone());

    let mut blank_genre = input("OK Computer", "Radiohead", "1997", AlbumStatus::Collection);
    blank_genre.genre = " ".to_string();

    for bad in [
        input("   ", "Radiohead", "1997", AlbumStatus::Collection),
        input("OK Computer", "", "1997", AlbumStatus::Collection),
        blank_genre,
    ] {
        let err = catalog.add(bad).await.unwrap_err();
        assert!(matches!(err, CatalogError::MissingField(_)));
    }
    assert_eq!(store.call_count(), 0);
    assert!(catalog.albums().await.is_empty());
}

#[tokio::test]
async fn add_falls_back_to_current_year_on_unparsable_input() {
    let store = Arc::new(RecordingStore::new());
    let catalog = CatalogService::new(store);

    let album = catalog
        .add(input("Lateralus", "Tool", "not a year", AlbumStatus::Collection))
        .await
        .unwrap();
    assert_eq!(album.year, current_year());
}

#[tokio::test]
async fn add_defaults_blank_spine_color() {
    let store = Arc::new(RecordingStore::new());
    let catalog = CatalogService::new(store);

    let mut blank = input("Lateralus", "Tool", "2001", AlbumStatus::Collection);
    blank.spine_color = "  ".to_string();
    let album = catalog.add(blank).await.unwrap();
    assert_eq!(album.spine_color, DEFAULT_SPINE_COLOR);
}

#[tokio::test]
async fn add_leaves_state_unchanged_on_remote_failure() {
    let store = Arc::new(RecordingStore::new());
    let catalog = CatalogService::new(store.clone());

    store.set_failing(true);
    let err = catalog
        .add(input("OK Computer", "Radiohead", "1997", AlbumStatus::Collection))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Store(_)));
    assert!(catalog.albums().await.is_empty());
}

#[tokio::test]
async fn remove_deletes_exactly_the_matching_record() {
    let store = Arc::new(RecordingStore::with_rows(vec![
        row("a", "Abbey Road", "The Beatles", "collection", "2024-01-02T00:00:00Z"),
        row("b", "Rumours", "Fleetwood Mac", "collection", "2024-01-01T00:00:00Z"),
    ]));
    let catalog = CatalogService::new(store);
    catalog.refresh().await.unwrap();

    catalog.remove("b").await.unwrap();

    let albums = catalog.albums().await;
    assert_eq!(albums.len(), 1);
    assert_eq!(albums[0].id, "a");
}

#[tokio::test]
async fn remove_leaves_state_unchanged_on_remote_failure() {
    let store = Arc::new(RecordingStore::with_rows(vec![row(
        "a",
        "Abbey Road",
        "The Beatles",
        "collection",
        "2024-01-02T00:00:00Z",
    )]));
    let catalog = CatalogService::new(store.clone());
    catalog.refresh().await.unwrap();

    store.set_failing(true);
    let err = catalog.remove("a").await.unwrap_err();
    assert!(matches!(err, CatalogError::Store(_)));
    assert_eq!(catalog.count().await, 1);
}

#[tokio::test]
async fn remove_unknown_id_makes_no_remote_call() {
    let store = Arc::new(RecordingStore::new());
    let catalog = CatalogService::new(store.clone());

    let err = catalog.remove("ghost").await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn move_to_collection_patches_only_status() {
    let store = Arc::new(RecordingStore::with_rows(vec![row(
        "w",
        "Kind of Blue",
        "Miles Davis",
        "wishlist",
        "2024-01-01T00:00:00Z",
    )]));
    let catalog = CatalogService::new(store);
    catalog.refresh().await.unwrap();

    let before = catalog.albums().await[0].clone();
    assert_eq!(before.status, AlbumStatus::Wishlist);

    let after = catalog.move_to_collection("w").await.unwrap();
    assert_eq!(after.status, AlbumStatus::Collection);

    // Everything except status is untouched.
    assert_eq!(after.id, before.id);
    assert_eq!(after.title, before.title);
    assert_eq!(after.artist, before.artist);
    assert_eq!(after.genre, before.genre);
    assert_eq!(after.year, before.year);
    assert_eq!(after.spine_color, before.spine_color);
    assert_eq!(after.added_at, before.added_at);
}

#[tokio::test]
async fn move_to_collection_leaves_state_unchanged_on_remote_failure() {
    let store = Arc::new(RecordingStore::with_rows(vec![row(
        "w",
        "Kind of Blue",
        "Miles Davis",
        "wishlist",
        "2024-01-01T00:00:00Z",
    )]));
    let catalog = CatalogService::new(store.clone());
    catalog.refresh().await.unwrap();

    store.set_failing(true);
    let err = catalog.move_to_collection("w").await.unwrap_err();
    assert!(matches!(err, CatalogError::Store(_)));
    assert_eq!(catalog.albums().await[0].status, AlbumStatus::Wishlist);
}

#[tokio::test]
async fn refresh_orders_newest_first() {
    let store = Arc::new(RecordingStore::with_rows(vec![
        row("old", "Rumours", "Fleetwood Mac", "collection", "2023-05-01T00:00:00Z"),
        row("new", "Thriller", "Michael Jackson", "collection", "2025-02-01T00:00:00Z"),
        row("mid", "Abbey Road", "The Beatles", "collection", "2024-08-01T00:00:00Z"),
    ]));
    let catalog = CatalogService::new(store);

    let albums = catalog.refresh().await.unwrap();
    let ids: Vec<&str> = albums.iter().map(|album| album.id.as_str()).collect();
    assert_eq!(ids, vec!["new", "mid", "old"]);
}

#[tokio::test]
async fn refresh_replaces_local_state_entirely() {
    let store = Arc::new(RecordingStore::with_rows(vec![row(
        "a",
        "Abbey Road",
        "The Beatles",
        "collection",
        "2024-01-01T00:00:00Z",
    )]));
    let catalog = CatalogService::new(store.clone());
    catalog.refresh().await.unwrap();

    // Mutate the table behind the catalog's back, then refresh.
    store.delete_album("a").await.unwrap();
    store
        .insert_albums(vec![vinyl_vault_server::catalog::row::NewAlbumRow {
            title: "Thriller".to_string(),
            artist: "Michael Jackson".to_string(),
            genre: "Pop".to_string(),
            year: 1982,
            spine_color: "#D08770".to_string(),
            status: "collection".to_string(),
            added_at: "2024-02-01T00:00:00Z".to_string(),
        }])
        .await
        .unwrap();

    let albums = catalog.refresh().await.unwrap();
    assert_eq!(albums.len(), 1);
    assert_eq!(albums[0].title, "Thriller");
}

#[tokio::test]
async fn refresh_on_empty_table_seeds_starter_records() {
    let store = Arc::new(RecordingStore::new());
    let catalog = CatalogService::new(store.clone());

    let albums = catalog.refresh().await.unwrap();
    assert_eq!(albums.len(), 6);
    assert!(albums
        .iter()
        .all(|album| album.status == AlbumStatus::Collection));
    assert!(albums.iter().all(|album| !album.id.is_empty()));

    let titles: Vec<&str> = albums.iter().map(|album| album.title.as_str()).collect();
    for expected in [
        "Abbey Road",
        "The Dark Side of the Moon",
        "Rumours",
        "Kind of Blue",
        "Thriller",
        "Back to Black",
    ] {
        assert!(titles.contains(&expected), "missing seed {}", expected);
    }

    // list, bulk insert, re-list: exactly one seeding pass.
    assert_eq!(store.call_count(), 3);

    // A second refresh must not seed again.
    let albums = catalog.refresh().await.unwrap();
    assert_eq!(albums.len(), 6);
}

#[tokio::test]
async fn duplicate_guard_holds_across_statuses() {
    let store = Arc::new(RecordingStore::with_rows(vec![row(
        "w",
        "Kind of Blue",
        "Miles Davis",
        "wishlist",
        "2024-01-01T00:00:00Z",
    )]));
    let catalog = CatalogService::new(store);
    catalog.refresh().await.unwrap();

    let err = catalog
        .add(input("KIND OF BLUE", "miles davis", "1959", AlbumStatus::Collection))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Duplicate { .. }));
}

#[tokio::test]
async fn loading_flag_clears_after_refresh() {
    let store = Arc::new(RecordingStore::new());
    let catalog = CatalogService::new(store.clone());
    assert!(!catalog.is_loading());

    catalog.refresh().await.unwrap();
    assert!(!catalog.is_loading());

    // Cleared on the failure path too.
    store.set_failing(true);
    let _ = catalog.refresh().await;
    assert!(!catalog.is_loading());
}

#[tokio::test]
async fn owned_pairs_exclude_wishlist() {
    let store = Arc::new(RecordingStore::with_rows(vec![
        row("a", "Abbey Road", "The Beatles", "collection", "2024-01-02T00:00:00Z"),
        row("w", "Kind of Blue", "Miles Davis", "wishlist", "2024-01-01T00:00:00Z"),
    ]));
    let catalog = CatalogService::new(store);
    catalog.refresh().await.unwrap();

    let owned = catalog.owned_pairs().await;
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].0, "Abbey Road");
}
