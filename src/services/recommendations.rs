use tracing::instrument;

use crate::{
    catalog::Catalog,
    error::AppResult,
    models::{RecommendationQuery, RecommendationResponse},
    services::{formatter, ranking::RankingStrategy},
};

/// Runs one recommendation query against the catalog
///
/// The caller chooses the ranking strategy. A title or director missing from
/// the catalog yields an empty response, never an error.
#[instrument(skip_all, fields(strategy = strategy.name(), kind = %query.kind, limit = query.limit))]
pub fn recommend(
    catalog: &Catalog,
    strategy: &dyn RankingStrategy,
    query: &RecommendationQuery,
) -> AppResult<RecommendationResponse> {
    let ranked = strategy.rank(catalog, query)?;

    tracing::info!(
        query = %query.value,
        results = ranked.len(),
        "Recommendations computed"
    );

    Ok(RecommendationResponse {
        movies: formatter::format(&ranked),
    })
}
