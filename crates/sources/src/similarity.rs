//! Similarity Source - content-based candidate generation
//!
//! Scores every catalog row against the user profile.
//!
//! ## Algorithm
//! 1. Dot product of each L2-normalized TF-IDF row with the unit-length
//!    profile vector (this is the cosine similarity)
//! 2. Sort by score descending, ties by catalog position ascending so the
//!    ranking is deterministic
//!
//! Scoring is embarrassingly parallel and runs on rayon's pool.

use crate::types::{Candidate, UserProfile};
use data_loader::RecommendationIndex;
use data_loader::vectorizer::sparse_dot;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Ranks the whole catalog by cosine similarity to a profile
#[derive(Clone)]
pub struct SimilaritySource {
    /// Shared reference to the index (read-only, so no Mutex needed)
    index: Arc<RecommendationIndex>,
}

impl SimilaritySource {
    pub fn new(index: Arc<RecommendationIndex>) -> Self {
        Self { index }
    }

    /// Cosine similarity of every catalog row, in catalog order
    pub fn score_all(&self, profile: &UserProfile) -> Vec<f32> {
        self.index
            .matrix()
            .rows()
            .par_iter()
            .map(|row| sparse_dot(row, &profile.vector))
            .collect()
    }

    /// Every catalog row as a candidate, best first
    #[instrument(skip(self, profile), fields(favorites = profile.resolved.len()))]
    pub fn get_candidates(&self, profile: &UserProfile) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = self
            .score_all(profile)
            .into_iter()
            .enumerate()
            .map(|(index, score)| Candidate::new(index, score))
            .collect();

        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.index.cmp(&b.index))
        });

        debug!("Generated {} similarity candidates", candidates.len());
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::build_user_profile;
    use data_loader::VectorizerConfig;

    fn create_test_index() -> Arc<RecommendationIndex> {
        let data = "title,genres,keywords,rating\n\
                    Alien,Horror SciFi,space monster,8.5\n\
                    Predator,Action SciFi,space hunter,7.8\n\
                    Titanic,Romance Drama,ship disaster,7.5\n\
                    Twin Titanic,Romance Drama,ship disaster,7.5\n";
        Arc::new(
            RecommendationIndex::load_from_reader(data.as_bytes(), VectorizerConfig::default())
                .unwrap(),
        )
    }

    #[test]
    fn test_scores_are_cosine() {
        let index = create_test_index();
        let source = SimilaritySource::new(index.clone());
        let profile = build_user_profile(&index, &["Alien"]).unwrap();

        let scores = source.score_all(&profile);

        assert_eq!(scores.len(), 4);
        assert!((scores[0] - 1.0).abs() < 1e-5, "self-similarity should be 1");
        assert!(scores[1] > 0.0 && scores[1] < 1.0);
        assert!(scores[2].abs() < 1e-6, "no shared terms");
    }

    #[test]
    fn test_candidates_sorted_descending() {
        let index = create_test_index();
        let source = SimilaritySource::new(index.clone());
        let profile = build_user_profile(&index, &["Alien"]).unwrap();

        let candidates = source.get_candidates(&profile);

        let order: Vec<_> = candidates.iter().map(|c| c.index).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert!(candidates.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_ties_break_by_catalog_position() {
        let index = create_test_index();
        let source = SimilaritySource::new(index.clone());
        let profile = build_user_profile(&index, &["Titanic"]).unwrap();

        let candidates = source.get_candidates(&profile);

        // Titanic and Twin Titanic have identical text
        assert_eq!(candidates[0].index, 2);
        assert_eq!(candidates[1].index, 3);
        assert_eq!(candidates[0].score, candidates[1].score);
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let index = create_test_index();
        let source = SimilaritySource::new(index.clone());
        let profile = build_user_profile(&index, &["Predator", "Titanic"]).unwrap();

        let first = source.get_candidates(&profile);
        let second = source.get_candidates(&profile);
        assert_eq!(first, second);
    }
}
