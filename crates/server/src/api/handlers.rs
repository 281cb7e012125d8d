use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::orchestrator::{MovieRecommendation, MovieSummary};

use super::AppState;

// Response types

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub movies: usize,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<MovieRecommendation>,
    pub count: usize,
}

// Handlers

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let response = match state.orchestrator() {
        Ok(orchestrator) => HealthResponse {
            status: "ok",
            movies: orchestrator.index().catalog().len(),
        },
        Err(_) => HealthResponse {
            status: "not_loaded",
            movies: 0,
        },
    };
    Json(response)
}

/// Get all movies in catalog order
pub async fn get_movies(State(state): State<AppState>) -> AppResult<Json<Vec<MovieSummary>>> {
    let orchestrator = state.orchestrator()?;
    Ok(Json(orchestrator.list_movies()))
}

/// Recommend movies similar to the user's favorites
pub async fn recommend(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<RecommendResponse>> {
    let orchestrator = state.orchestrator()?;
    let favorites = parse_favorites(body.ok().map(|Json(value)| value), state.max_favorites())?;

    let recommendations = orchestrator.get_recommendations(favorites, None).await?;
    if recommendations.is_empty() {
        return Err(AppError::NotFound(
            "No recommendations found. Please check your movie selections.".to_string(),
        ));
    }

    Ok(Json(RecommendResponse {
        count: recommendations.len(),
        recommendations,
    }))
}

/// Validate a `{"favorites": [...]}` body.
///
/// Bodies that are not JSON at all are treated like a missing `favorites`.
fn parse_favorites(body: Option<Value>, max_favorites: usize) -> AppResult<Vec<String>> {
    let Some(favorites) = body.as_ref().and_then(|value| value.get("favorites")) else {
        return Err(AppError::Validation(
            "Please provide a list of favorite movies".to_string(),
        ));
    };

    let list = match favorites.as_array() {
        Some(list) if !list.is_empty() => list,
        _ => {
            return Err(AppError::Validation(
                "Favorites must be a non-empty list".to_string(),
            ))
        }
    };

    if list.len() > max_favorites {
        return Err(AppError::Validation(format!(
            "Please select at most {} favorite movies",
            max_favorites
        )));
    }

    list.iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                AppError::Validation("Favorites must be a list of movie titles".to_string())
            })
        })
        .collect()
}
