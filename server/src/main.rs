mod config;
mod routes;

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{ServerConfig, ServerError};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let _ = dotenvy::dotenv();
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;
    let options = routes::leptos_options(&config)?;
    tracing::info!(site_root = %options.site_root, "leptos options loaded");

    let app = routes::app(options);
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;

    tracing::info!(port = config.port, "portal listening");
    axum::serve(listener, app).await?;
    Ok(())
}
