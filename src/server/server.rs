use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::services::ServeDir;
use tracing::info;

use crate::catalog::{AlbumStatus, CatalogError, CatalogService, NewAlbumInput, Recommendation};
use crate::enrichment::GeminiClient;

use super::config::ServerConfig;
use super::requests_logging::log_requests;
use super::state::{GuardedCatalog, OptionalEnricher, ServerState};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub albums: usize,
    pub loading: bool,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

fn error_response(err: CatalogError) -> Response {
    let status = match &err {
        CatalogError::Duplicate { .. } => StatusCode::CONFLICT,
        CatalogError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::Store(_) => StatusCode::BAD_GATEWAY,
    };
    (status, format!("{}", err)).into_response()
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        albums: state.catalog.count().await,
        loading: state.catalog.is_loading(),
    };
    Json(stats)
}

#[derive(Deserialize, Debug)]
struct AlbumsQuery {
    pub status: Option<AlbumStatus>,
}

async fn get_albums(
    State(catalog): State<GuardedCatalog>,
    Query(query): Query<AlbumsQuery>,
) -> Response {
    let albums = match query.status {
        Some(status) => catalog.albums_with_status(status).await,
        None => catalog.albums().await,
    };
    Json(albums).into_response()
}

async fn refresh_albums(State(catalog): State<GuardedCatalog>) -> Response {
    match catalog.refresh().await {
        Ok(albums) => Json(albums).into_response(),
        Err(err) => error_response(err),
    }
}

async fn post_album(
    State(catalog): State<GuardedCatalog>,
    Json(input): Json<NewAlbumInput>,
) -> Response {
    match catalog.add(input).await {
        Ok(album) => (StatusCode::CREATED, Json(album)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn delete_album(
    State(catalog): State<GuardedCatalog>,
    Path(id): Path<String>,
) -> Response {
    match catalog.remove(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

async fn move_album_to_collection(
    State(catalog): State<GuardedCatalog>,
    Path(id): Path<String>,
) -> Response {
    match catalog.move_to_collection(&id).await {
        Ok(album) => Json(album).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize, Debug)]
struct MetadataQuery {
    pub title: String,
    pub artist: String,
}

async fn get_album_metadata(
    State(enricher): State<OptionalEnricher>,
    Query(query): Query<MetadataQuery>,
) -> Response {
    let Some(enricher) = enricher else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let title = query.title.trim();
    let artist = query.artist.trim();
    if title.is_empty() || artist.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            "title and artist are required",
        )
            .into_response();
    }

    match enricher.fetch_album_metadata(title, artist).await {
        Some(metadata) => Json(metadata).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn get_recommendations(State(state): State<ServerState>) -> Response {
    let Some(enricher) = state.enricher else {
        return Json(Vec::<Recommendation>::new()).into_response();
    };

    let owned = state.catalog.owned_pairs().await;
    let recommendations = enricher.fetch_recommendations(&owned).await;
    Json(recommendations).into_response()
}

pub fn make_app(
    config: ServerConfig,
    catalog: Arc<CatalogService>,
    enricher: Option<Arc<GeminiClient>>,
) -> Router {
    let state = ServerState {
        config: config.clone(),
        start_time: Instant::now(),
        catalog,
        enricher,
        hash: env!("GIT_HASH").to_string(),
    };

    let album_routes: Router = Router::new()
        .route("/albums", get(get_albums))
        .route("/albums", post(post_album))
        .route("/albums/refresh", post(refresh_albums))
        .route("/albums/{id}", delete(delete_album))
        .route("/albums/{id}/collection", post(move_album_to_collection))
        .with_state(state.clone());

    let enrichment_routes: Router = Router::new()
        .route("/enrichment/metadata", get(get_album_metadata))
        .route("/enrichment/recommendations", get(get_recommendations))
        .with_state(state.clone());

    let home_router: Router = match &config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    let app = home_router.nest("/v1", album_routes.merge(enrichment_routes));

    app.layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(
    config: ServerConfig,
    catalog: Arc<CatalogService>,
    enricher: Option<Arc<GeminiClient>>,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, catalog, enricher);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Listening on port {}", port);

    Ok(axum::serve(listener, app).await?)
}
