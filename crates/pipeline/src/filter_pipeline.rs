//! Post-scoring filter chain.
//!
//! Candidates arrive sorted best first from the similarity source. Every
//! filter in the chain only removes entries, so the list handed to the
//! ranker is still in score order and truncating it yields the top N.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, UserProfile};

/// Ordered list of [`Filter`]s run one after another over a ranked list.
///
/// Filters run in insertion order. Favorites are normally removed before
/// duplicate titles, so a favorite never "claims" a title and hides a
/// lower-scored movie with the same name.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(AlreadyFavoritedFilter::new(index.clone()))
///     .add_filter(DuplicateTitleFilter::new(index.clone()));
///
/// let filtered = pipeline.apply(candidates, &profile)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Append a filter; it runs after every filter already added
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run the chain over `candidates` (best first).
    ///
    /// The surviving candidates keep their relative order. The first filter
    /// error aborts the chain.
    pub fn apply(
        &self,
        candidates: Vec<Candidate>,
        profile: &UserProfile,
    ) -> Result<Vec<Candidate>> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, profile)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
