//! Standalone HTTP server for the recommendation API.
//!
//! Configuration comes from the environment (and `.env`), see [`Config`].

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug,sources=debug,pipeline=debug")),
        )
        .init();

    let config = Config::from_env()?;
    info!("Starting ReelRecs server with {:?}", config);

    let orchestrator = server::load_orchestrator(&config)?;
    let (movies, features) = orchestrator.index().counts();
    info!("Index ready: {} movies, {} features", movies, features);

    server::serve(&config, orchestrator).await
}
