// Garden server binary entry point
//
// Usage: cargo run --bin garden_server

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use herbal_garden::garden::FileLayoutStore;
use herbal_garden::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // Default log level: info for our crate, warn for others
                "herbal_garden=info,tower_http=debug,axum=debug,warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting herbal garden server...");

    // Configuration from environment variables
    let layout_dir = std::env::var("LAYOUT_DIR").unwrap_or_else(|_| "data".to_string());
    let asset_dir = std::env::var("ASSET_DIR").unwrap_or_else(|_| "assets".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    tracing::info!("Configuration:");
    tracing::info!("  LAYOUT_DIR: {}", layout_dir);
    tracing::info!("  ASSET_DIR: {}", asset_dir);
    tracing::info!("  PORT: {}", port);

    // Initialize application state (loads the catalog and any saved layout)
    let store = Arc::new(FileLayoutStore::new(&layout_dir));
    let state = AppState::new(store)?;
    tracing::info!("Application state initialized successfully");

    // Router plus static assets. Plant photos keep their /images/... paths
    // from the dataset, everything else lives under /assets.
    let asset_path = std::path::PathBuf::from(&asset_dir);
    let app = create_router(state)
        .nest_service("/assets", ServeDir::new(&asset_path))
        .nest_service("/images", ServeDir::new(asset_path.join("images")));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
