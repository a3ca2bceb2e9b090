mod config;
mod constants;
mod domain;
mod routes;
mod services;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use config::Config;
use services::store::{PgSettingsStore, PgTweetStore, SettingsStore, TweetStore};
use services::wordpress::WordPressClient;

pub struct AppState {
    pub tweets: Arc<dyn TweetStore>,
    pub settings: Arc<dyn SettingsStore>,
    pub wordpress: WordPressClient,
}

fn init_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let state = Arc::new(AppState {
        tweets: Arc::new(PgTweetStore::new(pool.clone())),
        settings: Arc::new(PgSettingsStore::new(pool)),
        wordpress: WordPressClient::new(),
    });

    let app = routes::build_app(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
