//! Pipeline for filtering and ranking scored movie candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - Ranker, which applies the standard filters and keeps the top N
//!
//! ## Architecture
//! The pipeline processes a ranking in stages:
//! 1. Filters remove unwanted candidates (favorites, duplicate titles)
//! 2. The survivors are truncated to the requested size
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::Ranker;
//!
//! let candidates = source.get_candidates(&profile);
//! let top = Ranker::new(index.clone()).rank(candidates, &profile, None)?;
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod ranker;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use ranker::{Ranker, DEFAULT_TOP_N};
