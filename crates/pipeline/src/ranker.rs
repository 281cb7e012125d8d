//! Final ranking step: filter a scored candidate list and cut it to size.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::{AlreadyFavoritedFilter, DuplicateTitleFilter};
use anyhow::{Context, Result};
use data_loader::RecommendationIndex;
use sources::{Candidate, UserProfile};
use std::sync::Arc;

/// Default number of recommendations per request
pub const DEFAULT_TOP_N: usize = 5;

/// Removes favorites and duplicate titles, then keeps the best `top_n`.
pub struct Ranker {
    filter_pipeline: FilterPipeline,
    top_n: usize,
}

impl Ranker {
    /// Ranker with the standard filters: favorites first, then duplicates
    pub fn new(index: Arc<RecommendationIndex>) -> Self {
        let filter_pipeline = FilterPipeline::new()
            .add_filter(AlreadyFavoritedFilter::new(index.clone()))
            .add_filter(DuplicateTitleFilter::new(index));
        Self::with_pipeline(filter_pipeline)
    }

    pub fn with_pipeline(filter_pipeline: FilterPipeline) -> Self {
        Self {
            filter_pipeline,
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Configure how many results to keep (default: 5)
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Rank candidates that are already sorted best first.
    ///
    /// `limit` overrides the configured `top_n` for a single call.
    pub fn rank(
        &self,
        candidates: Vec<Candidate>,
        profile: &UserProfile,
        limit: Option<usize>,
    ) -> Result<Vec<Candidate>> {
        let mut ranked = self
            .filter_pipeline
            .apply(candidates, profile)
            .context("Failed to apply filters")?;
        ranked.truncate(limit.unwrap_or(self.top_n));
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::VectorizerConfig;
    use sources::{build_user_profile, SimilaritySource};

    fn create_test_index() -> Arc<RecommendationIndex> {
        let data = "title,genres,keywords,rating\n\
                    Alien,Horror SciFi,space monster,8.5\n\
                    Aliens,Horror SciFi,space monster marines,8.3\n\
                    Predator,Action SciFi,space hunter,7.8\n\
                    Gravity,SciFi Drama,space station,7.3\n\
                    Solaris,SciFi Drama,ocean planet,7.0\n\
                    Heat,Crime Drama,heist bank,8.0\n\
                    Titanic,Romance Drama,ship disaster,7.5\n\
                    aliens,Horror SciFi,space monster marines,2.0\n";
        Arc::new(
            RecommendationIndex::load_from_reader(data.as_bytes(), VectorizerConfig::default())
                .unwrap(),
        )
    }

    fn ranked_titles(index: &Arc<RecommendationIndex>, favorites: &[&str], limit: Option<usize>) -> Vec<String> {
        let profile = build_user_profile(index, favorites).unwrap();
        let candidates = SimilaritySource::new(index.clone()).get_candidates(&profile);
        Ranker::new(index.clone())
            .rank(candidates, &profile, limit)
            .unwrap()
            .iter()
            .map(|c| index.get_movie(c.index).unwrap().title.clone())
            .collect()
    }

    #[test]
    fn test_default_top_n() {
        let index = create_test_index();
        let titles = ranked_titles(&index, &["Alien"], None);

        assert_eq!(titles.len(), DEFAULT_TOP_N);
        assert_eq!(titles[0], "Aliens");
        assert!(!titles.iter().any(|t| t.eq_ignore_ascii_case("alien")));
    }

    #[test]
    fn test_duplicates_collapsed() {
        let index = create_test_index();
        let titles = ranked_titles(&index, &["Alien"], Some(10));

        let aliens = titles.iter().filter(|t| t.eq_ignore_ascii_case("aliens")).count();
        assert_eq!(aliens, 1);
        // 8 rows - 1 favorite - 1 duplicate
        assert_eq!(titles.len(), 6);
    }

    #[test]
    fn test_limit_override() {
        let index = create_test_index();
        assert_eq!(ranked_titles(&index, &["Heat"], Some(2)).len(), 2);
        assert!(ranked_titles(&index, &["Heat"], Some(0)).is_empty());
    }

    #[test]
    fn test_with_top_n() {
        let index = create_test_index();
        let ranker = Ranker::new(index).with_top_n(3);
        assert_eq!(ranker.top_n(), 3);
    }
}
