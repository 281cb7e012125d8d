//! Build a UserProfile from a list of favorite titles.
//!
//! The profile is the arithmetic mean of the favorites' TF-IDF rows. The
//! mean of several unit vectors is generally shorter than one, so the result
//! is re-normalized before it is used for cosine scoring.

use crate::types::UserProfile;
use data_loader::types::title_key;
use data_loader::vectorizer::l2_normalize;
use data_loader::{MovieIndex, RecommendationIndex};
use std::collections::HashSet;
use tracing::debug;

/// Resolve `favorites` against the catalog and average their vectors.
///
/// Titles match case-insensitively and exactly; the first catalog entry with
/// a matching title wins. Unknown titles are dropped. Returns `None` when
/// nothing resolved.
pub fn build_user_profile<S: AsRef<str>>(
    index: &RecommendationIndex,
    favorites: &[S],
) -> Option<UserProfile> {
    let mut resolved: Vec<MovieIndex> = Vec::with_capacity(favorites.len());
    for title in favorites {
        match index.find_by_title(title.as_ref()) {
            Some(movie_index) => resolved.push(movie_index),
            None => debug!("Favorite {:?} not in catalog, ignoring", title.as_ref()),
        }
    }

    if resolved.is_empty() {
        return None;
    }

    let mut vector = vec![0.0f32; index.space().dimensions()];
    for &movie_index in &resolved {
        if let Some(row) = index.movie_vector(movie_index) {
            for &(feature, weight) in row {
                vector[feature] += weight;
            }
        }
    }
    let count = resolved.len() as f32;
    for x in vector.iter_mut() {
        *x /= count;
    }
    l2_normalize(&mut vector);

    let favorites: HashSet<String> = favorites.iter().map(|t| title_key(t.as_ref())).collect();

    Some(UserProfile {
        favorites,
        resolved,
        vector,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::VectorizerConfig;

    fn create_test_index() -> RecommendationIndex {
        let data = "title,genres,keywords,rating\n\
                    Alien,Horror SciFi,space monster,8.5\n\
                    Predator,Action SciFi,space hunter,7.8\n\
                    Titanic,Romance Drama,ship disaster,7.5\n";
        RecommendationIndex::load_from_reader(data.as_bytes(), VectorizerConfig::default()).unwrap()
    }

    fn norm(v: &[f32]) -> f32 {
        v.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    #[test]
    fn test_single_favorite_profile_equals_row() {
        let index = create_test_index();
        let profile = build_user_profile(&index, &["ALIEN"]).unwrap();

        assert_eq!(profile.resolved, vec![0]);
        assert_eq!(profile.vector.len(), index.space().dimensions());
        for &(feature, weight) in index.movie_vector(0).unwrap() {
            assert!((profile.vector[feature] - weight).abs() < 1e-6);
        }
    }

    #[test]
    fn test_profile_is_renormalized() {
        let index = create_test_index();
        let profile = build_user_profile(&index, &["Alien", "Titanic"]).unwrap();

        // Alien and Titanic share no terms, so the raw mean has norm ~0.707
        assert_eq!(profile.resolved, vec![0, 2]);
        assert!((norm(&profile.vector) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_unknown_titles_are_dropped() {
        let index = create_test_index();
        let profile = build_user_profile(&index, &["Nope", "predator"]).unwrap();

        assert_eq!(profile.resolved, vec![1]);
        assert!(profile.is_favorite("NOPE"));
        assert!(profile.is_favorite("Predator"));
        assert!(!profile.is_favorite("Alien"));
    }

    #[test]
    fn test_no_resolved_titles() {
        let index = create_test_index();
        assert!(build_user_profile(&index, &["Nope", "Also Nope"]).is_none());
        assert!(build_user_profile::<&str>(&index, &[]).is_none());
    }

    #[test]
    fn test_title_match_is_exact() {
        let index = create_test_index();
        assert!(build_user_profile(&index, &["Alien "]).is_none());
        assert!(build_user_profile(&index, &["Alie"]).is_none());
    }
}
