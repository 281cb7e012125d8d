//! # Sources Crate
//!
//! Turns a request's favorite titles into a profile and scores the catalog
//! against it.
//!
//! ## Components
//!
//! ### Profile Builder
//! Resolves favorite titles to catalog rows and averages their TF-IDF
//! vectors into one unit-length profile vector.
//!
//! ### Similarity Source
//! Content-based candidate generation:
//! - Cosine similarity between the profile and every catalog row
//! - Deterministic ordering (score desc, catalog position asc)
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{build_user_profile, SimilaritySource};
//! use std::sync::Arc;
//!
//! let index = Arc::new(RecommendationIndex::load_from_file(path, config)?);
//! let source = SimilaritySource::new(index.clone());
//!
//! if let Some(profile) = build_user_profile(&index, &["Alien", "Heat"]) {
//!     let candidates = source.get_candidates(&profile);
//! }
//! ```

// Public modules
pub mod types;
pub mod profile;
pub mod similarity;

// Re-export commonly used types
pub use types::{Candidate, UserProfile};
pub use profile::build_user_profile;
pub use similarity::SimilaritySource;
