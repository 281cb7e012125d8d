use crate::error::{AppError, AppResult};
use crate::orchestrator::RecommendationOrchestrator;

/// Shared application state
///
/// The orchestrator is read-only once built, so clones share it without
/// any locking. `None` means the dataset never loaded.
#[derive(Clone)]
pub struct AppState {
    orchestrator: Option<RecommendationOrchestrator>,
    max_favorites: usize,
}

impl AppState {
    pub fn new(orchestrator: RecommendationOrchestrator, max_favorites: usize) -> Self {
        Self {
            orchestrator: Some(orchestrator),
            max_favorites,
        }
    }

    /// State for a server whose dataset failed to load
    pub fn not_loaded(max_favorites: usize) -> Self {
        Self {
            orchestrator: None,
            max_favorites,
        }
    }

    pub fn orchestrator(&self) -> AppResult<&RecommendationOrchestrator> {
        self.orchestrator.as_ref().ok_or(AppError::NotLoaded)
    }

    pub fn max_favorites(&self) -> usize {
        self.max_favorites
    }
}
