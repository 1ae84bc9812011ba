//! Depot API Server
//!
//! Main entry point for the Depot upload service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use depot_api::{AppState, create_router};
use depot_core::storage::{LocalStore, RemoteStore, RemoteStoreConfig, StorageProvider};
use depot_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "depot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Local uploads directory, created on startup
    let local = LocalStore::new(&config.storage.root)?;
    info!(root = %local.root().display(), "Local upload store ready");

    // One shared object store client for the process lifetime
    let provider = StorageProvider::s3(
        config.object_store.endpoint.clone(),
        config.object_store.bucket.clone(),
        config.object_store.access_key_id.clone(),
        config.object_store.secret_access_key.clone(),
        config.object_store.region.clone(),
    );
    let remote = RemoteStore::from_config(RemoteStoreConfig::new(
        provider,
        config.object_store.public_domain.clone(),
    ))?;
    info!(
        provider = remote.provider_name(),
        bucket = remote.bucket(),
        "Object store client ready"
    );

    // Create application state
    let state = AppState {
        local: Arc::new(local),
        remote: Arc::new(remote),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
