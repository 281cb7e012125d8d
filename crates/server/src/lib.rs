//! Server crate for the ReelRecs recommendation engine.
//!
//! This crate contains the orchestrator that coordinates the recommendation
//! pipeline and the HTTP API that exposes it.

pub mod api;
pub mod config;
pub mod error;
pub mod orchestrator;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use data_loader::RecommendationIndex;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use orchestrator::{MovieRecommendation, MovieSummary, RecommendationOrchestrator};

/// Load the dataset named by `config` and build an orchestrator over it.
///
/// Any failure here is fatal: the server must not start without a catalog.
pub fn load_orchestrator(config: &Config) -> Result<RecommendationOrchestrator> {
    let index = RecommendationIndex::load_from_file(&config.dataset_path, config.vectorizer_config())
        .with_context(|| format!("Failed to load dataset from {}", config.dataset_path.display()))?;
    Ok(RecommendationOrchestrator::new(Arc::new(index), config.top_n))
}

/// Bind the configured address and serve the API until the process exits
pub async fn serve(config: &Config, orchestrator: RecommendationOrchestrator) -> Result<()> {
    let state = AppState::new(orchestrator, config.max_favorites);
    let app = create_router(state, config.static_dir.as_deref());

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on http://{}", addr);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
