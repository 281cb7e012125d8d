//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to a ranked candidate list.

use anyhow::Result;
use sources::{Candidate, UserProfile};

/// Core trait for filtering candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across request handlers
/// - Filters take ownership of the Vec<Candidate> and return a filtered Vec
/// - Filters must preserve the relative order of the candidates they keep
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a ranked set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter, best first (takes ownership)
    /// * `profile` - The requesting user's profile and favorites
    fn apply(
        &self,
        candidates: Vec<Candidate>,
        profile: &UserProfile,
    ) -> Result<Vec<Candidate>>;
}
