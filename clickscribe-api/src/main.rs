//! # Clickscribe API Server
//!
//! HTTP server for the clickable-page system: user accounts, page trees
//! (headers, subheaders, recursively nested buttons), and their retrieval
//! for the scratch-buffer front end.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p clickscribe-api
//! ```

use clickscribe_api::{
    app::{build_router, AppState},
    config::Config,
};
use clickscribe_shared::db::{
    migrations::{ensure_database_exists, run_migrations},
    pool::{close_pool, create_pool, DatabaseConfig},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clickscribe_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Clickscribe API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let bind_address = config.bind_address();

    // Database: create if missing, connect, migrate
    ensure_database_exists(&config.database.url).await?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let state = AppState::new(pool.clone(), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown signal received, closing pool...");
    close_pool(pool).await;

    Ok(())
}

/// Resolves when Ctrl-C is received
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
