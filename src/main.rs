use anyhow::Context;
use tracing_subscriber::EnvFilter;

use bookmarks_api::app::app;
use bookmarks_api::config::AppConfig;
use bookmarks_api::database::open_store;
use bookmarks_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bookmarks_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!("Starting Bookmarks API in {:?} mode", config.environment);

    let store = open_store(&config.database)
        .await
        .context("failed to open store")?;

    let port = config.api.port;
    let state = AppState::new(config, store).context("failed to build token issuer")?;

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Bookmarks API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .await
        .context("server error")?;

    Ok(())
}
