use axum::extract::FromRef;
use std::sync::Arc;
use std::time::Instant;

use crate::catalog::CatalogService;
use crate::enrichment::GeminiClient;

use super::ServerConfig;

pub type GuardedCatalog = Arc<CatalogService>;
pub type OptionalEnricher = Option<Arc<GeminiClient>>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub catalog: GuardedCatalog,
    pub enricher: OptionalEnricher,
    pub hash: String,
}

impl FromRef<ServerState> for GuardedCatalog {
    fn from_ref(input: &ServerState) -> Self {
        input.catalog.clone()
    }
}

impl FromRef<ServerState> for OptionalEnricher {
    fn from_ref(input: &ServerState) -> Self {
        input.enricher.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
