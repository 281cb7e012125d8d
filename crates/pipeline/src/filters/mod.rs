//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod already_favorited;
pub mod duplicate_title;

// Re-export for convenience
pub use already_favorited::AlreadyFavoritedFilter;
pub use duplicate_title::DuplicateTitleFilter;
