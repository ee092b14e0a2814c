//! Gemini-flavored `generateContent` client with structured JSON output.
//!
//! Both operations send a single prompt with a response schema attached, so
//! the model's reply parses directly into the domain types.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::{AlbumMetadata, Recommendation};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const METADATA_MODEL: &str = "gemini-2.5-flash";
const RECOMMENDATIONS_MODEL: &str = "gemini-3-flash-preview";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How many suggestions a single recommendation request asks for.
const RECOMMENDATION_COUNT: usize = 3;

#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("request timed out")]
    Timeout,

    #[error("rate limited by the enrichment service")]
    RateLimited,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Client for a generative metadata service.
///
/// The service is treated as unreliable and rate-limited; callers get an
/// absent or empty result on any failure and must not assume the casing
/// they sent comes back unchanged.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_default_base_url(api_key: impl Into<String>) -> Self {
        Self::new(DEFAULT_BASE_URL, api_key)
    }

    /// Look up canonical metadata for a record. `None` on any failure.
    pub async fn fetch_album_metadata(&self, title: &str, artist: &str) -> Option<AlbumMetadata> {
        match self.request_metadata(title, artist).await {
            Ok(metadata) => Some(metadata),
            Err(err) => {
                warn!(%title, %artist, error = %err, "Album metadata lookup failed");
                None
            }
        }
    }

    /// Suggest records to buy next, given the owned `(title, artist)` pairs.
    /// Empty on any failure.
    pub async fn fetch_recommendations(&self, owned: &[(String, String)]) -> Vec<Recommendation> {
        match self.request_recommendations(owned).await {
            Ok(recommendations) => recommendations,
            Err(err) => {
                warn!(error = %err, "Recommendation request failed");
                Vec::new()
            }
        }
    }

    async fn request_metadata(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<AlbumMetadata, EnrichmentError> {
        let prompt = format!(
            "Provide metadata for the vinyl album \"{title}\" by \"{artist}\". \
             1. Identify the official canonical spelling and capitalization for the Artist and Album Title. \
             2. Provide the primary genre. \
             3. Provide the release year. \
             4. Provide a short one-sentence description. \
             5. Provide a hex color code for the spine based on the cover art."
        );

        let schema = json!({
            "type": "OBJECT",
            "properties": {
                "correctArtist": { "type": "STRING" },
                "correctTitle": { "type": "STRING" },
                "genre": { "type": "STRING" },
                "year": { "type": "INTEGER" },
                "description": { "type": "STRING" },
                "spineColor": { "type": "STRING" }
            },
            "required": ["correctArtist", "correctTitle", "genre", "year", "description", "spineColor"]
        });

        let text = self.generate(METADATA_MODEL, &prompt, schema).await?;
        serde_json::from_str(&text).map_err(|e| {
            EnrichmentError::InvalidResponse(format!("Malformed metadata payload: {}", e))
        })
    }

    async fn request_recommendations(
        &self,
        owned: &[(String, String)],
    ) -> Result<Vec<Recommendation>, EnrichmentError> {
        let collection_summary = owned
            .iter()
            .map(|(title, artist)| format!("{} by {}", title, artist))
            .collect::<Vec<_>>()
            .join(", ");

        let prompt = format!(
            "Based on my record collection: [{collection_summary}], suggest {RECOMMENDATION_COUNT} \
             specific vinyl albums I should consider getting next. Focus on high-quality pressings \
             and similar vibes. Include the genre, release year, and a suggested spine color (hex). \
             Provide a \"reason\" field that is witty and related to my existing taste."
        );

        let schema = json!({
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": {
                    "title": { "type": "STRING" },
                    "artist": { "type": "STRING" },
                    "reason": { "type": "STRING" },
                    "genre": { "type": "STRING" },
                    "year": { "type": "INTEGER" },
                    "spineColor": { "type": "STRING" }
                },
                "required": ["title", "artist", "reason", "genre", "year", "spineColor"]
            }
        });

        let text = self.generate(RECOMMENDATIONS_MODEL, &prompt, schema).await?;
        serde_json::from_str(&text).map_err(|e| {
            EnrichmentError::InvalidResponse(format!("Malformed recommendations payload: {}", e))
        })
    }

    /// Run one structured-output generation and return the raw JSON text of
    /// the first candidate.
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        response_schema: serde_json::Value,
    ) -> Result<String, EnrichmentError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema,
            },
        };

        debug!(model = %model, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EnrichmentError::Timeout
                } else {
                    EnrichmentError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(EnrichmentError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichmentError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            EnrichmentError::InvalidResponse(format!(
                "Failed to parse generateContent response: {}",
                e
            ))
        })?;

        body.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| {
                EnrichmentError::InvalidResponse("No candidates in response".to_string())
            })
    }
}

// Gemini API types

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}
