//! Core domain types for the movie catalog.
//!
//! A [`Catalog`] is an ordered list of [`MovieRecord`]s. The position of a
//! record is its [`MovieIndex`], which is also the row of its TF-IDF vector in
//! the [`crate::DocumentMatrix`]. Nothing here is mutated after loading.

use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Position of a movie in the catalog (and of its row in the document matrix)
pub type MovieIndex = usize;

// =============================================================================
// Movie Record
// =============================================================================

/// One cleaned row of the movie dataset.
///
/// Title, genres and keywords are guaranteed non-empty once a record has
/// been through the parser; `rating` is optional in the source data.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    pub title: String,
    /// Free-text genre list, e.g. "Action Adventure Science Fiction"
    pub genres: String,
    /// Free-text keyword list, e.g. "space war rebellion"
    pub keywords: String,
    pub rating: Option<f32>,
}

impl MovieRecord {
    /// Text fed to the vectorizer: genres, one space, keywords
    pub fn combined_features(&self) -> String {
        format!("{} {}", self.genres, self.keywords)
    }

    /// Rating with missing values reported as 0.0
    pub fn rating_or_zero(&self) -> f32 {
        self.rating.unwrap_or(0.0)
    }
}

/// Normalizes a title for case-insensitive lookups
pub fn title_key(title: &str) -> String {
    title.to_lowercase()
}

// =============================================================================
// Catalog
// =============================================================================

/// Ordered, index-addressable movie collection.
///
/// Titles are not required to be unique. The lookup table maps each
/// lowercased title to the first record that carries it.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<MovieRecord>,
    title_index: HashMap<String, MovieIndex>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self {
            movies: Vec::new(),
            title_index: HashMap::new(),
        }
    }

    /// Builds a catalog from records, preserving their order
    pub fn from_records(records: Vec<MovieRecord>) -> Self {
        let mut catalog = Self::new();
        for record in records {
            catalog.insert_movie(record);
        }
        catalog
    }

    /// Append a movie and return its index
    pub fn insert_movie(&mut self, movie: MovieRecord) -> MovieIndex {
        let index = self.movies.len();
        // First occurrence wins for duplicate titles
        self.title_index
            .entry(title_key(&movie.title))
            .or_insert(index);
        self.movies.push(movie);
        index
    }

    /// Get a movie by its catalog position
    pub fn get_movie(&self, index: MovieIndex) -> Option<&MovieRecord> {
        self.movies.get(index)
    }

    /// Case-insensitive exact title lookup
    pub fn find_by_title(&self, title: &str) -> Option<MovieIndex> {
        self.title_index.get(&title_key(title)).copied()
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn iter(&self) -> impl Iterator<Item = &MovieRecord> {
        self.movies.iter()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            genres: "Drama".to_string(),
            keywords: "family".to_string(),
            rating: None,
        }
    }

    #[test]
    fn test_combined_features() {
        let record = MovieRecord {
            title: "Alien".to_string(),
            genres: "Horror SciFi".to_string(),
            keywords: "space monster".to_string(),
            rating: Some(8.5),
        };
        assert_eq!(record.combined_features(), "Horror SciFi space monster");
        assert_eq!(record.rating_or_zero(), 8.5);
    }

    #[test]
    fn test_missing_rating_is_zero() {
        assert_eq!(movie("Heat").rating_or_zero(), 0.0);
    }

    #[test]
    fn test_find_by_title_is_case_insensitive() {
        let catalog = Catalog::from_records(vec![movie("The Matrix"), movie("Heat")]);

        assert_eq!(catalog.find_by_title("the matrix"), Some(0));
        assert_eq!(catalog.find_by_title("HEAT"), Some(1));
        assert_eq!(catalog.find_by_title("Heat 2"), None);
    }

    #[test]
    fn test_duplicate_titles_resolve_to_first() {
        let catalog = Catalog::from_records(vec![
            movie("Heat"),
            movie("Alien"),
            movie("heat"),
        ]);

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.find_by_title("Heat"), Some(0));
        assert_eq!(catalog.get_movie(2).unwrap().title, "heat");
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.get_movie(0).is_none());
        assert!(catalog.find_by_title("anything").is_none());
    }
}
