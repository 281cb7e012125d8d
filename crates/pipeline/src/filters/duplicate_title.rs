//! Filter to collapse catalog entries that share a title.
//!
//! The catalog does not enforce unique titles, so the same movie can show up
//! more than once in a ranking.

use crate::traits::Filter;
use anyhow::Result;
use data_loader::RecommendationIndex;
use data_loader::types::title_key;
use sources::{Candidate, UserProfile};
use std::collections::HashSet;
use std::sync::Arc;

/// Keeps only the best-ranked candidate per lowercased title.
///
/// Relies on its input being sorted best first.
pub struct DuplicateTitleFilter {
    index: Arc<RecommendationIndex>,
}

impl DuplicateTitleFilter {
    pub fn new(index: Arc<RecommendationIndex>) -> Self {
        Self { index }
    }
}

impl Filter for DuplicateTitleFilter {
    fn name(&self) -> &str {
        "DuplicateTitleFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _profile: &UserProfile,
    ) -> Result<Vec<Candidate>> {
        let mut seen: HashSet<String> = HashSet::new();
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| match self.index.get_movie(candidate.index) {
                Some(movie) => seen.insert(title_key(&movie.title)),
                None => false,
            })
            .collect();
        Ok(filtered)
    }
}
