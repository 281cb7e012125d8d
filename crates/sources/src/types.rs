//! Shared types for candidate generation.

use data_loader::MovieIndex;
use std::collections::HashSet;

/// A catalog row scored against a user profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub index: MovieIndex,
    /// Cosine similarity with the profile
    pub score: f32,
}

impl Candidate {
    pub fn new(index: MovieIndex, score: f32) -> Self {
        Self { index, score }
    }
}

/// Everything a single request knows about the user.
///
/// Built once per request by [`crate::profile::build_user_profile`] and
/// dropped when the response is sent.
#[derive(Debug, Clone)]
pub struct UserProfile {
    /// Every requested title, lowercased, whether or not it resolved
    pub favorites: HashSet<String>,
    /// Catalog indices the favorites resolved to, in request order
    pub resolved: Vec<MovieIndex>,
    /// Unit-length mean of the resolved TF-IDF rows
    pub vector: Vec<f32>,
}

impl UserProfile {
    /// True if `title` was one of the requested favorites (case-insensitive)
    pub fn is_favorite(&self, title: &str) -> bool {
        self.favorites.contains(&data_loader::types::title_key(title))
    }
}
