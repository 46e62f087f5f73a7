use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use beerparty_core::{
    load_config, playlist::Authorizer, playlist::CatalogSearch, validate_config, BeerStore,
    PartyPlanner, PlaylistOrchestrator, SpotifyClient, SqliteBeerStore,
};
use beerparty_server::{api::create_router, state::AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("BEERPARTY_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Database path: {:?}", config.database.path);

    let store: Arc<dyn BeerStore> = Arc::new(
        SqliteBeerStore::new(&config.database.path).context("Failed to create beer store")?,
    );
    info!("Beer store initialized");

    // One client serves as both authorizer and catalog search
    let party = match &config.spotify {
        Some(spotify_config) => {
            info!("Initializing Spotify client");
            let client = Arc::new(
                SpotifyClient::new(spotify_config.clone())
                    .context("Failed to create Spotify client")?,
            );
            let orchestrator = PlaylistOrchestrator::new(
                Arc::clone(&client) as Arc<dyn Authorizer>,
                client as Arc<dyn CatalogSearch>,
            )
            .with_call_timeout(Duration::from_secs(spotify_config.timeout_secs));
            Some(PartyPlanner::new(Arc::clone(&store), orchestrator))
        }
        None => {
            warn!("Spotify not configured, /party will answer 503");
            None
        }
    };

    let state = Arc::new(AppState::new(config.clone(), store, party));
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
