//! # Recommendation Orchestrator
//!
//! This module coordinates the recommendation pipeline for one request:
//! 1. Build the user profile from the favorite titles
//! 2. Score every catalog row against the profile
//! 3. Filter (favorites, duplicate titles) and keep the top N
//! 4. Attach catalog metadata to each survivor
//!
//! Steps 1-3 are CPU-bound and run on the blocking pool so the async
//! runtime stays responsive while rayon scores the catalog.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use data_loader::{MovieRecord, RecommendationIndex};
use pipeline::Ranker;
use sources::{build_user_profile, Candidate, SimilaritySource, UserProfile};

/// Terms listed in an explanation
const EXPLAIN_TERMS: usize = 3;

/// Final recommendation returned to the user
#[derive(Debug, Clone, Serialize)]
pub struct MovieRecommendation {
    pub title: String,
    pub genres: String,
    pub keywords: String,
    /// Dataset rating, 0.0 when the row had none
    pub rating: f32,
    /// Cosine similarity between the movie and the user profile
    pub similarity_score: f32,
    #[serde(skip)]
    pub explanation: String,
}

/// Catalog entry as listed by `GET /api/movies`
#[derive(Debug, Clone, Serialize)]
pub struct MovieSummary {
    pub title: String,
    pub genres: String,
    pub rating: Option<f32>,
}

impl From<&MovieRecord> for MovieSummary {
    fn from(movie: &MovieRecord) -> Self {
        Self {
            title: movie.title.clone(),
            genres: movie.genres.clone(),
            rating: movie.rating,
        }
    }
}

/// Main orchestrator that coordinates the recommendation pipeline
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    index: Arc<RecommendationIndex>,
    similarity: SimilaritySource,
    ranker: Arc<Ranker>,
}

impl RecommendationOrchestrator {
    /// Create a new orchestrator over a loaded index
    ///
    /// # Arguments
    /// * `index` - Shared reference to the recommendation index
    /// * `top_n` - Default number of recommendations per request
    pub fn new(index: Arc<RecommendationIndex>, top_n: usize) -> Self {
        let similarity = SimilaritySource::new(index.clone());
        let ranker = Arc::new(Ranker::new(index.clone()).with_top_n(top_n));
        Self {
            index,
            similarity,
            ranker,
        }
    }

    pub fn index(&self) -> &Arc<RecommendationIndex> {
        &self.index
    }

    /// Main entry point: get recommendations for a list of favorite titles
    ///
    /// # Arguments
    /// * `favorites` - Titles the user likes (case-insensitive exact match)
    /// * `limit` - Overrides the configured top N when set
    ///
    /// # Returns
    /// Recommendations sorted by similarity (highest first). Empty when none
    /// of the favorites is in the catalog.
    pub async fn get_recommendations(
        &self,
        favorites: Vec<String>,
        limit: Option<usize>,
    ) -> Result<Vec<MovieRecommendation>> {
        let start_time = Instant::now();
        let requested = favorites.len();

        let recommendations = tokio::task::spawn_blocking({
            let orchestrator = self.clone();
            move || orchestrator.recommend(&favorites, limit)
        })
        .await
        .context("Recommendation task panicked")??;

        info!(
            "Selected {} recommendations for {} favorites in {:.2?}",
            recommendations.len(),
            requested,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Synchronous pipeline, runs on the calling thread
    pub fn recommend<S: AsRef<str>>(
        &self,
        favorites: &[S],
        limit: Option<usize>,
    ) -> Result<Vec<MovieRecommendation>> {
        let Some(profile) = build_user_profile(&self.index, favorites) else {
            debug!("None of the {} favorites are in the catalog", favorites.len());
            return Ok(Vec::new());
        };
        debug!(
            "Built user profile from {} of {} favorites",
            profile.resolved.len(),
            favorites.len()
        );

        let candidates = self.similarity.get_candidates(&profile);
        let ranked = self
            .ranker
            .rank(candidates, &profile, limit)
            .context("Failed to rank candidates")?;

        Ok(ranked
            .into_iter()
            .filter_map(|candidate| self.to_recommendation(candidate, &profile))
            .collect())
    }

    /// All catalog entries in load order
    pub fn list_movies(&self) -> Vec<MovieSummary> {
        self.index
            .catalog()
            .iter()
            .map(MovieSummary::from)
            .collect()
    }

    fn to_recommendation(
        &self,
        candidate: Candidate,
        profile: &UserProfile,
    ) -> Option<MovieRecommendation> {
        let movie = self.index.get_movie(candidate.index)?;
        Some(MovieRecommendation {
            title: movie.title.clone(),
            genres: movie.genres.clone(),
            keywords: movie.keywords.clone(),
            rating: movie.rating_or_zero(),
            similarity_score: candidate.score,
            explanation: self.explain(candidate, profile),
        })
    }

    /// Name the terms that contributed most to a candidate's score
    fn explain(&self, candidate: Candidate, profile: &UserProfile) -> String {
        let Some(row) = self.index.movie_vector(candidate.index) else {
            return String::new();
        };

        let mut contributions: Vec<(usize, f32)> = row
            .iter()
            .map(|&(feature, weight)| (feature, weight * profile.vector[feature]))
            .filter(|&(_, contribution)| contribution > 0.0)
            .collect();
        contributions.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        let terms: Vec<&str> = contributions
            .iter()
            .take(EXPLAIN_TERMS)
            .filter_map(|&(feature, _)| self.index.space().term(feature))
            .collect();

        if terms.is_empty() {
            format!("Score: {:.3}, no shared terms", candidate.score)
        } else {
            format!("Score: {:.3}, shares: {}", candidate.score, terms.join(", "))
        }
    }
}
