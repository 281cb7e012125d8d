//! Filter to remove movies the user listed as favorites.
//!
//! There's no point in recommending a movie the user just told us they love.

use crate::traits::Filter;
use anyhow::Result;
use data_loader::RecommendationIndex;
use sources::{Candidate, UserProfile};
use std::sync::Arc;

/// Removes candidates whose title matches a requested favorite.
///
/// ## Algorithm
/// Looks the candidate's title up in `UserProfile.favorites` (lowercased
/// HashSet). Titles that did not resolve to a catalog row are still in the
/// set, so a differently-cased duplicate entry is excluded too.
pub struct AlreadyFavoritedFilter {
    index: Arc<RecommendationIndex>,
}

impl AlreadyFavoritedFilter {
    pub fn new(index: Arc<RecommendationIndex>) -> Self {
        Self { index }
    }
}

impl Filter for AlreadyFavoritedFilter {
    fn name(&self) -> &str {
        "AlreadyFavoritedFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        profile: &UserProfile,
    ) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| match self.index.get_movie(candidate.index) {
                Some(movie) => !profile.is_favorite(&movie.title),
                None => false,
            })
            .collect();
        Ok(filtered)
    }
}
