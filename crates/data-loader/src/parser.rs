//! Parser for the movie CSV dataset.
//!
//! Expected header (column order is free, extra columns are ignored):
//!
//! ```text
//! title,genres,keywords,rating
//! Avatar,Action Adventure Fantasy,culture clash future space war,7.2
//! ```
//!
//! Rows with an empty title, genres or keywords field are dropped. A rating
//! that is empty or not a finite number is kept as `None`. Short rows are
//! read as if the trailing fields were empty.

use crate::error::{DataLoadError, Result};
use crate::types::MovieRecord;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Columns every dataset must provide
pub const REQUIRED_COLUMNS: [&str; 4] = ["title", "genres", "keywords", "rating"];

/// Raw row as it appears in the file, before cleaning
#[derive(Debug, Deserialize)]
struct RawMovieRow {
    title: Option<String>,
    genres: Option<String>,
    keywords: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    rating: Option<f32>,
}

impl RawMovieRow {
    /// Returns `None` when any of the text fields is missing
    fn into_movie(self) -> Option<MovieRecord> {
        let title = non_empty(self.title)?;
        let genres = non_empty(self.genres)?;
        let keywords = non_empty(self.keywords)?;

        Some(MovieRecord {
            title,
            genres,
            keywords,
            rating: self.rating.filter(|r| r.is_finite()),
        })
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse the dataset file at `path`
pub fn parse_movies(path: &Path) -> Result<Vec<MovieRecord>> {
    if !path.is_file() {
        return Err(DataLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let file = File::open(path)?;
    parse_movies_from_reader(file)
}

/// Parse CSV movie data from any reader
pub fn parse_movies_from_reader<R: Read>(reader: R) -> Result<Vec<MovieRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    check_required_columns(&headers)?;

    let mut movies = Vec::new();
    let mut skipped = 0usize;

    for result in csv_reader.records() {
        let record = result?;
        let row: RawMovieRow = record.deserialize(Some(&headers))?;

        match row.into_movie() {
            Some(movie) => movies.push(movie),
            None => {
                skipped += 1;
                debug!(
                    line = record.position().map(|p| p.line()),
                    "Skipping movie row with missing title, genres or keywords"
                );
            }
        }
    }

    info!("Parsed {} movies ({} incomplete rows skipped)", movies.len(), skipped);
    Ok(movies)
}

/// Verify that every required column is present in the header
fn check_required_columns(headers: &csv::StringRecord) -> Result<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .map(String::from)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DataLoadError::MissingColumns { columns: missing })
    }
}
