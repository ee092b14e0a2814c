//! Catalog error taxonomy.
//!
//! Validation failures are raised before any remote call; a `Store` error
//! always means the remote mutation did not take effect and local state was
//! left untouched. None of these are fatal to the process.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("\"{title}\" by {artist} is already in the vault")]
    Duplicate { title: String, artist: String },

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("no album with id {0}")]
    NotFound(String),

    #[error("remote store request failed: {0}")]
    Store(#[from] anyhow::Error),
}
