//! TF-IDF feature extraction over the catalog's combined text field.
//!
//! ## Algorithm
//! 1. Lowercase each document and split it into tokens of two or more word
//!    characters; drop stop words
//! 2. Emit n-grams over the remaining tokens (unigrams and bigrams by default)
//! 3. Keep the `max_features` terms with the highest document frequency,
//!    ties broken lexically, then number them in lexical order
//! 4. Weight each term as `count * idf` with
//!    `idf = ln((1 + n) / (1 + df)) + 1`
//! 5. L2-normalize every row so cosine similarity is a plain dot product
//!
//! Rows are stored sparse: a 5000-term vocabulary over a few thousand movies
//! is almost entirely zeros.

use crate::error::{DataLoadError, Result};
use crate::stop_words::is_stop_word;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Sparse vector: `(feature index, weight)` pairs sorted by feature index
pub type SparseVector = Vec<(usize, f32)>;

/// Tunables for fitting the vector space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorizerConfig {
    /// Upper bound on the vocabulary size
    pub max_features: usize,
    /// Inclusive (min, max) n-gram lengths
    pub ngram_range: (usize, usize),
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            ngram_range: (1, 2),
        }
    }
}

// =============================================================================
// Analysis
// =============================================================================

/// Lowercase, split on non-word characters, drop one-character tokens and
/// stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| w.chars().count() >= 2)
        .filter(|w| !is_stop_word(w))
        .map(|w| w.to_string())
        .collect()
}

/// Turn a document into its n-gram terms
pub fn analyze(text: &str, ngram_range: (usize, usize)) -> Vec<String> {
    let tokens = tokenize(text);
    let (min_n, max_n) = ngram_range;
    let mut terms = Vec::new();

    for n in min_n.max(1)..=max_n {
        if n > tokens.len() {
            break;
        }
        if n == 1 {
            terms.extend(tokens.iter().cloned());
        } else {
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
    }
    terms
}

// =============================================================================
// Vector math
// =============================================================================

/// Normalize a dense vector to unit length (in place). Zero vectors are left as is.
pub fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Euclidean norm of a sparse vector
pub fn sparse_norm(v: &[(usize, f32)]) -> f32 {
    v.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
}

/// Dot product of a sparse row with a dense vector
pub fn sparse_dot(row: &[(usize, f32)], dense: &[f32]) -> f32 {
    row.iter()
        .map(|&(idx, w)| dense.get(idx).map_or(0.0, |d| w * d))
        .sum()
}

// =============================================================================
// Fitted state
// =============================================================================

/// Fitted vocabulary and IDF weights
#[derive(Debug, Clone)]
pub struct VectorSpace {
    /// term -> feature index
    vocabulary: HashMap<String, usize>,
    /// feature index -> term, lexically sorted
    terms: Vec<String>,
    /// IDF weight per feature
    idf: Vec<f32>,
    config: VectorizerConfig,
}

impl VectorSpace {
    /// Vocabulary size
    pub fn dimensions(&self) -> usize {
        self.terms.len()
    }

    pub fn feature_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(|t| t.as_str())
    }

    pub fn idf(&self, index: usize) -> Option<f32> {
        self.idf.get(index).copied()
    }

    pub fn config(&self) -> VectorizerConfig {
        self.config
    }

    /// Project arbitrary text into the fitted space
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&analyze(text, self.config.ngram_range))
    }

    /// Count in-vocabulary terms, apply IDF, normalize
    fn weigh(&self, terms: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for term in terms {
            if let Some(&idx) = self.vocabulary.get(term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut row: SparseVector = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]))
            .collect();
        row.sort_unstable_by_key(|&(idx, _)| idx);

        let norm = sparse_norm(&row);
        if norm > 0.0 {
            for (_, w) in row.iter_mut() {
                *w /= norm;
            }
        }
        row
    }
}

/// One L2-normalized TF-IDF row per catalog entry, in catalog order
#[derive(Debug, Clone)]
pub struct DocumentMatrix {
    rows: Vec<SparseVector>,
    dims: usize,
}

impl DocumentMatrix {
    pub fn row(&self, index: usize) -> Option<&[(usize, f32)]> {
        self.rows.get(index).map(|r| r.as_slice())
    }

    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    pub fn dimensions(&self) -> usize {
        self.dims
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Fitting
// =============================================================================

/// Fits a [`VectorSpace`] and produces the matching [`DocumentMatrix`]
#[derive(Debug, Clone, Default)]
pub struct Vectorizer {
    config: VectorizerConfig,
}

impl Vectorizer {
    pub fn new(config: VectorizerConfig) -> Self {
        Self { config }
    }

    /// Fit the vocabulary on `documents` and vectorize each of them.
    ///
    /// Fails with `EmptyCatalog` for no documents and `EmptyVocabulary` when
    /// nothing survives stop-word removal.
    pub fn fit_transform(&self, documents: &[String]) -> Result<(VectorSpace, DocumentMatrix)> {
        if documents.is_empty() {
            return Err(DataLoadError::EmptyCatalog);
        }

        let analyzed: Vec<Vec<String>> = documents
            .par_iter()
            .map(|doc| analyze(doc, self.config.ngram_range))
            .collect();

        // Document frequency per term
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for terms in &analyzed {
            let unique: HashSet<&str> = terms.iter().map(|t| t.as_str()).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(DataLoadError::EmptyVocabulary);
        }
        let total_terms = doc_freq.len();

        // Cap by document frequency, ties broken lexically
        let mut ranked: Vec<(&str, usize)> = doc_freq.into_iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.config.max_features);
        ranked.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let n = documents.len() as f32;
        let terms: Vec<String> = ranked.iter().map(|(t, _)| t.to_string()).collect();
        let idf: Vec<f32> = ranked
            .iter()
            .map(|&(_, df)| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();
        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();

        debug!(
            "Vocabulary capped at {} of {} distinct terms",
            terms.len(),
            total_terms
        );

        let space = VectorSpace {
            vocabulary,
            terms,
            idf,
            config: self.config,
        };

        let rows: Vec<SparseVector> = analyzed.par_iter().map(|t| space.weigh(t)).collect();
        let matrix = DocumentMatrix {
            rows,
            dims: space.dimensions(),
        };

        Ok((space, matrix))
    }
}
