// Sales Insight - Web Server

use anyhow::{Context, Result};
use clap::Parser;
use sales_insight::config::ServerConfig;
use sales_insight::http::{router, AppState};
use sales_insight::{logging, SqliteStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    logging::init_logger(config.verbose);

    let store = SqliteStore::open(&config.db_path)?;
    tracing::info!(path = %config.db_path.display(), records = store.verify_count()?, "database opened");

    let app = router(AppState::new(store, config.seed_url.clone()));

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    tracing::info!("server running on http://{}", config.bind);
    tracing::info!("seed source: {}", config.seed_url);

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
