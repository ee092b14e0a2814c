use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vinyl_vault_server::catalog::CatalogService;
use vinyl_vault_server::enrichment::GeminiClient;
use vinyl_vault_server::server::{run_server, RequestsLoggingLevel, ServerConfig};
use vinyl_vault_server::store::{AlbumStore, MemoryAlbumStore, RestAlbumStore};

#[derive(Parser, Debug)]
struct CliArgs {
    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// Base URL of the hosted row store's REST endpoint
    /// (e.g. "https://xyz.supabase.co/rest/v1"). Falls back to an
    /// in-process store when omitted.
    #[clap(long)]
    pub store_url: Option<String>,

    /// API key for the hosted row store.
    #[clap(long, env = "VAULT_STORE_KEY", hide_env_values = true)]
    pub store_key: Option<String>,

    /// Timeout in seconds for row store requests.
    #[clap(long, default_value_t = 30)]
    pub store_timeout_sec: u64,

    /// API key for the AI enrichment service. Metadata lookup and
    /// recommendations are disabled when omitted.
    #[clap(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Base URL of the AI enrichment service, for proxies and test doubles.
    #[clap(long)]
    pub gemini_base_url: Option<String>,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Skip the initial catalog refresh (and the seeding it may trigger).
    #[clap(long)]
    pub skip_initial_refresh: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let store: Arc<dyn AlbumStore> = match cli_args.store_url {
        Some(url) => {
            let key = cli_args.store_key.ok_or_else(|| {
                anyhow::anyhow!("--store-key (or VAULT_STORE_KEY) is required with --store-url")
            })?;
            info!("Using hosted album store at {}", url);
            Arc::new(RestAlbumStore::new(url, &key, cli_args.store_timeout_sec)?)
        }
        None => {
            warn!("No store URL configured, album data will not survive a restart");
            Arc::new(MemoryAlbumStore::new())
        }
    };

    let catalog = Arc::new(CatalogService::new(store));

    if !cli_args.skip_initial_refresh {
        info!("Loading the catalog...");
        let albums = catalog.refresh().await?;
        info!("Catalog loaded with {} records", albums.len());
    }

    let enricher = cli_args.gemini_api_key.map(|key| {
        info!("AI enrichment enabled");
        Arc::new(match cli_args.gemini_base_url {
            Some(base_url) => GeminiClient::new(base_url, key),
            None => GeminiClient::with_default_base_url(key),
        })
    });
    if enricher.is_none() {
        info!("No enrichment API key configured, metadata lookup and recommendations are disabled");
    }

    let config = ServerConfig {
        port: cli_args.port,
        requests_logging_level: cli_args.logging_level,
        frontend_dir_path: cli_args.frontend_dir_path,
    };

    info!("Ready to serve at port {}!", config.port);
    run_server(config, catalog, enricher).await
}
