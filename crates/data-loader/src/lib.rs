//! # Data Loader Crate
//!
//! This crate loads the movie catalog and builds its TF-IDF representation.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRecord, Catalog)
//! - **parser**: Parse the CSV dataset into clean records
//! - **vectorizer**: Tokenization, vocabulary fitting and TF-IDF weighting
//! - **index**: RecommendationIndex, the immutable catalog + vectors bundle
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{RecommendationIndex, VectorizerConfig};
//! use std::path::Path;
//!
//! let index = RecommendationIndex::load_from_file(
//!     Path::new("data/movies.csv"),
//!     VectorizerConfig::default(),
//! )?;
//!
//! let alien = index.find_by_title("alien").unwrap();
//! let row = index.movie_vector(alien).unwrap();
//! println!("{} has {} non-zero features", index.get_movie(alien).unwrap().title, row.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod stop_words;
pub mod vectorizer;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::RecommendationIndex;
pub use types::{Catalog, MovieIndex, MovieRecord};
pub use vectorizer::{DocumentMatrix, SparseVector, Vectorizer, VectorizerConfig, VectorSpace};
