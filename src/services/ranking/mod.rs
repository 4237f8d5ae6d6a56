//! Ranking strategies
//!
//! Each strategy selects and orders catalog records for a query. The two
//! strategies are independent; callers pick one explicitly rather than the
//! service choosing based on the shape of the query.

use crate::{
    catalog::Catalog,
    error::AppResult,
    models::{MovieRecord, RecommendationQuery},
};

pub mod matcher;
pub mod similarity;

pub use matcher::AttributeMatcher;
pub use similarity::GenreSimilarityRanker;

/// A catalog record selected for a query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommendation<'a> {
    pub movie: &'a MovieRecord,
    /// Present only for similarity-ranked results
    pub similarity: Option<f64>,
}

impl<'a> Recommendation<'a> {
    pub fn matched(movie: &'a MovieRecord) -> Self {
        Self {
            movie,
            similarity: None,
        }
    }

    pub fn scored(movie: &'a MovieRecord, similarity: f64) -> Self {
        Self {
            movie,
            similarity: Some(similarity),
        }
    }
}

/// Ordered recommendations borrowed from the catalog
pub type RecommendationResult<'a> = Vec<Recommendation<'a>>;

/// Trait for ranking strategies
///
/// An unknown title or director is not an error: strategies return an empty
/// result. Errors are reserved for internal faults.
pub trait RankingStrategy: Send + Sync {
    fn rank<'a>(
        &self,
        catalog: &'a Catalog,
        query: &RecommendationQuery,
    ) -> AppResult<RecommendationResult<'a>>;

    /// Strategy name for logging
    fn name(&self) -> &'static str;
}
