use crate::{
    catalog::Catalog,
    error::AppResult,
    models::{QueryKind, RecommendationQuery},
};

use super::{RankingStrategy, Recommendation, RecommendationResult};

/// Filters the catalog by shared director or overlapping genres.
///
/// Results keep catalog order; nothing is re-ranked by relevance.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeMatcher;

impl AttributeMatcher {
    /// Movies related to the first movie titled `title`.
    ///
    /// A record qualifies when it shares the anchor's director or at least one
    /// of its genres. Every record carrying the queried title is excluded,
    /// the anchor included.
    fn related_to_title<'a>(
        catalog: &'a Catalog,
        title: &str,
        limit: usize,
    ) -> RecommendationResult<'a> {
        let Some((_, anchor)) = catalog.find_by_title(title) else {
            tracing::debug!(title = %title, "Title not in catalog");
            return Vec::new();
        };

        catalog
            .movies()
            .iter()
            .filter(|movie| !movie.has_title(title))
            .filter(|movie| movie.has_director(&anchor.director) || anchor.shares_genre_with(movie))
            .take(limit)
            .map(Recommendation::matched)
            .collect()
    }

    fn by_director<'a>(
        catalog: &'a Catalog,
        director: &str,
        limit: usize,
    ) -> RecommendationResult<'a> {
        catalog
            .movies()
            .iter()
            .filter(|movie| movie.has_director(director))
            .take(limit)
            .map(Recommendation::matched)
            .collect()
    }
}

impl RankingStrategy for AttributeMatcher {
    fn rank<'a>(
        &self,
        catalog: &'a Catalog,
        query: &RecommendationQuery,
    ) -> AppResult<RecommendationResult<'a>> {
        let result = match query.kind {
            QueryKind::TitleLookup => Self::related_to_title(catalog, &query.value, query.limit),
            QueryKind::DirectorLookup => Self::by_director(catalog, &query.value, query.limit),
        };
        Ok(result)
    }

    fn name(&self) -> &'static str {
        "attribute"
    }
}
