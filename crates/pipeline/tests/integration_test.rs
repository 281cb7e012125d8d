//! Integration tests for the pipeline.
//!
//! These tests verify that profile building, similarity scoring and ranking
//! work together in a realistic scenario.

use data_loader::{RecommendationIndex, VectorizerConfig};
use pipeline::filters::*;
use pipeline::{FilterPipeline, Ranker, DEFAULT_TOP_N};
use sources::{build_user_profile, Candidate, SimilaritySource};
use std::collections::HashSet;
use std::sync::Arc;

const DATASET: &str = "title,genres,keywords,rating
Alien,Horror Science Fiction,android space marine spaceship monster,7.9
Aliens,Horror Action Thriller Science Fiction,android spaceship space marine monster colony,7.7
Predator,Science Fiction Action Adventure Thriller,jungle hunter alien guerrilla commando,7.3
Titanic,Drama Romance Thriller,shipwreck iceberg ship disaster love,7.5
The Notebook,Romance Drama,love letter memory nursing home romance,7.7
Gravity,Science Fiction Thriller Drama,space station astronaut survival debris,7.3
The Martian,Drama Adventure Science Fiction,mars space survival astronaut botanist,7.6
Toy Story,Animation Comedy Family,toy friendship rivalry jealousy boy,7.7
Heat,Action Crime Drama Thriller,heist bank robbery detective los angeles,7.7
Jaws,Horror Thriller Adventure,shark beach island police chief,7.5
aliens,Horror Action Thriller Science Fiction,android spaceship space marine monster colony,6.0
";

fn create_test_setup() -> Arc<RecommendationIndex> {
    Arc::new(
        RecommendationIndex::load_from_reader(DATASET.as_bytes(), VectorizerConfig::default())
            .unwrap(),
    )
}

fn recommend(index: &Arc<RecommendationIndex>, favorites: &[&str]) -> Vec<Candidate> {
    let Some(profile) = build_user_profile(index, favorites) else {
        return Vec::new();
    };
    let candidates = SimilaritySource::new(index.clone()).get_candidates(&profile);
    Ranker::new(index.clone())
        .rank(candidates, &profile, None)
        .unwrap()
}

fn titles(index: &RecommendationIndex, ranked: &[Candidate]) -> Vec<String> {
    ranked
        .iter()
        .map(|c| index.get_movie(c.index).unwrap().title.clone())
        .collect()
}

#[test]
fn test_full_pipeline_ranks_correctly() {
    let index = create_test_setup();

    let ranked = recommend(&index, &["Alien", "Predator", "Titanic"]);
    let names = titles(&index, &ranked);

    assert_eq!(ranked.len(), DEFAULT_TOP_N);
    assert!(
        ranked.windows(2).all(|w| w[0].score >= w[1].score),
        "Scores should be non-increasing"
    );
    for favorite in ["alien", "predator", "titanic"] {
        assert!(
            !names.iter().any(|t| t.to_lowercase() == favorite),
            "Favorites must never be recommended"
        );
    }

    let unique: HashSet<String> = names.iter().map(|t| t.to_lowercase()).collect();
    assert_eq!(unique.len(), names.len(), "Titles must be unique");

    // Aliens shares most of its text with Alien
    assert_eq!(names[0], "Aliens");
}

#[test]
fn test_scores_are_cosine_similarities() {
    let index = create_test_setup();

    let ranked = recommend(&index, &["Gravity"]);

    assert!(!ranked.is_empty());
    for candidate in &ranked {
        assert!(candidate.score >= 0.0 && candidate.score <= 1.0 + 1e-5);
    }
}

#[test]
fn test_unknown_favorites_give_no_results() {
    let index = create_test_setup();

    assert!(recommend(&index, &["Not A Movie", "Also Missing"]).is_empty());
}

#[test]
fn test_unresolved_titles_are_ignored() {
    let index = create_test_setup();

    let with_noise = recommend(&index, &["Heat", "Not A Movie"]);
    let without = recommend(&index, &["Heat"]);

    assert_eq!(with_noise, without);
}

#[test]
fn test_recommendations_are_idempotent() {
    let index = create_test_setup();

    let first = recommend(&index, &["Toy Story", "jaws"]);
    let second = recommend(&index, &["Toy Story", "jaws"]);

    assert_eq!(first, second);
}

#[test]
fn test_custom_pipeline_keeps_duplicates() {
    let index = create_test_setup();
    let profile = build_user_profile(&index, &["Alien"]).unwrap();
    let candidates = SimilaritySource::new(index.clone()).get_candidates(&profile);

    // Without DuplicateTitleFilter both "Aliens" rows come through
    let ranker = Ranker::with_pipeline(
        FilterPipeline::new().add_filter(AlreadyFavoritedFilter::new(index.clone())),
    );
    let ranked = ranker.rank(candidates, &profile, None).unwrap();
    let names = titles(&index, &ranked);

    assert_eq!(names[0], "Aliens");
    assert_eq!(names[1], "aliens");
}
