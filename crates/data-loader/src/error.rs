//! Error types for the data-loader crate.
//!
//! Everything in here is a load-time failure: the server refuses to start
//! when any of these come back from [`crate::RecommendationIndex::load_from_file`].

use thiserror::Error;

/// Errors that can occur while loading the catalog and fitting the vector space
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Dataset file could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the dataset
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader rejected the input (bad quoting, bad UTF-8)
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// The header is missing one or more of the required columns
    #[error("Missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// No usable rows survived cleaning
    #[error("Catalog is empty: no rows with title, genres and keywords")]
    EmptyCatalog,

    /// Every document consisted of stop words only
    #[error("Empty vocabulary: documents contain only stop words")]
    EmptyVocabulary,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
