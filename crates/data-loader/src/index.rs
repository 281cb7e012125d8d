//! RecommendationIndex building.
//!
//! The index bundles the three pieces that must always agree with each other:
//! the cleaned catalog, the fitted vector space and the document matrix.
//! They are built together here and never mutated afterwards, so the index
//! can be shared behind an `Arc` by every request handler.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::{Catalog, MovieIndex, MovieRecord};
use crate::vectorizer::{DocumentMatrix, Vectorizer, VectorizerConfig, VectorSpace};
use rayon::prelude::*;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Catalog plus its TF-IDF representation; row `i` describes `catalog[i]`
#[derive(Debug)]
pub struct RecommendationIndex {
    catalog: Catalog,
    space: VectorSpace,
    matrix: DocumentMatrix,
}

impl RecommendationIndex {
    /// Load the dataset CSV and build the index
    ///
    /// This is the main entry point used at startup. Any error here is fatal.
    pub fn load_from_file(path: &Path, config: VectorizerConfig) -> Result<Self> {
        info!("Loading movie dataset from {:?}", path);
        let start = Instant::now();

        let movies = parser::parse_movies(path)?;
        let index = Self::build(Catalog::from_records(movies), config)?;

        info!("RecommendationIndex built in {:?}", start.elapsed());
        Ok(index)
    }

    /// Same as [`Self::load_from_file`] but reads CSV from any reader
    pub fn load_from_reader<R: Read>(reader: R, config: VectorizerConfig) -> Result<Self> {
        let movies = parser::parse_movies_from_reader(reader)?;
        Self::build(Catalog::from_records(movies), config)
    }

    /// Fit the vector space over a catalog
    pub fn build(catalog: Catalog, config: VectorizerConfig) -> Result<Self> {
        if catalog.is_empty() {
            return Err(DataLoadError::EmptyCatalog);
        }

        let documents: Vec<String> = catalog
            .movies()
            .par_iter()
            .map(MovieRecord::combined_features)
            .collect();

        let (space, matrix) = Vectorizer::new(config).fit_transform(&documents)?;

        info!(
            "Loaded {} movies, TF-IDF matrix shape: ({}, {})",
            catalog.len(),
            matrix.len(),
            matrix.dimensions()
        );

        Ok(Self {
            catalog,
            space,
            matrix,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn space(&self) -> &VectorSpace {
        &self.space
    }

    pub fn matrix(&self) -> &DocumentMatrix {
        &self.matrix
    }

    /// Get a movie by its catalog position
    pub fn get_movie(&self, index: MovieIndex) -> Option<&MovieRecord> {
        self.catalog.get_movie(index)
    }

    /// Case-insensitive exact title lookup, first match wins
    pub fn find_by_title(&self, title: &str) -> Option<MovieIndex> {
        self.catalog.find_by_title(title)
    }

    /// TF-IDF row of a movie
    pub fn movie_vector(&self, index: MovieIndex) -> Option<&[(usize, f32)]> {
        self.matrix.row(index)
    }

    /// (movies, vocabulary size) for debugging/validation
    pub fn counts(&self) -> (usize, usize) {
        (self.catalog.len(), self.space.dimensions())
    }
}
