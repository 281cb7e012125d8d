use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
///
/// When `static_dir` is set, unmatched paths are served from it and fall
/// back to its `index.html`.
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/movies", get(handlers::get_movies))
        .route("/api/recommend", post(handlers::recommend))
        .with_state(state);

    let router = match static_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
        ),
        None => router,
    };

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
