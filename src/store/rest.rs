//! HTTP client for a hosted PostgREST-style row store.
//!
//! Works with Supabase and any other service exposing the PostgREST query
//! dialect (`order=added_at.desc`, `id=eq.<id>` filters, and the
//! `Prefer: return=representation` insert header).

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::time::Duration;

use crate::catalog::row::{AlbumRow, NewAlbumRow};
use crate::catalog::AlbumStatus;

use super::AlbumStore;

pub struct RestAlbumStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestAlbumStore {
    /// Create a new row store client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the REST endpoint (e.g.,
    ///   "https://xyz.supabase.co/rest/v1")
    /// * `api_key` - Service key, sent as both `apikey` and bearer token
    /// * `timeout_sec` - Request timeout in seconds
    pub fn new(base_url: String, api_key: &str, timeout_sec: u64) -> Result<Self> {
        let mut headers = HeaderMap::new();

        let mut key_value =
            HeaderValue::from_str(api_key).context("API key is not a valid header value")?;
        key_value.set_sensitive(true);
        headers.insert("apikey", key_value);

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .context("API key is not a valid header value")?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .context("Failed to create HTTP client")?;

        // Ensure base_url doesn't have trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    fn albums_url(&self) -> String {
        format!("{}/albums", self.base_url)
    }

    /// Get the base URL of the row store.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AlbumStore for RestAlbumStore {
    async fn list_albums(&self) -> Result<Vec<AlbumRow>> {
        let response = self
            .client
            .get(self.albums_url())
            .query(&[("select", "*"), ("order", "added_at.desc")])
            .send()
            .await
            .context("Failed to reach the album store")?;

        if !response.status().is_success() {
            anyhow::bail!("Album listing failed with status {}", response.status());
        }

        response
            .json()
            .await
            .context("Failed to parse album rows")
    }

    async fn insert_albums(&self, rows: Vec<NewAlbumRow>) -> Result<Vec<AlbumRow>> {
        let response = self
            .client
            .post(self.albums_url())
            .header("Prefer", "return=representation")
            .json(&rows)
            .send()
            .await
            .context("Failed to reach the album store")?;

        if !response.status().is_success() {
            anyhow::bail!("Album insert failed with status {}", response.status());
        }

        response
            .json()
            .await
            .context("Failed to parse inserted rows")
    }

    async fn update_status(&self, id: &str, status: AlbumStatus) -> Result<()> {
        let response = self
            .client
            .patch(self.albums_url())
            .query(&[("id", format!("eq.{}", id))])
            .json(&serde_json::json!({ "status": status.to_db_str() }))
            .send()
            .await
            .context("Failed to reach the album store")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Status update for album {} failed with status {}",
                id,
                response.status()
            );
        }

        Ok(())
    }

    async fn delete_album(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.albums_url())
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await
            .context("Failed to reach the album store")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Delete of album {} failed with status {}",
                id,
                response.status()
            );
        }

        Ok(())
    }
}
