use crate::{
    catalog::Catalog,
    error::{AppError, AppResult},
    models::{QueryKind, RecommendationQuery},
};

use super::{RankingStrategy, Recommendation, RecommendationResult};

/// Ranks the catalog by cosine similarity of binary genre vectors.
///
/// Only title lookups are meaningful for this strategy; director lookups
/// yield an empty result.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenreSimilarityRanker;

/// Rounds a score to 3 decimal places
fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

impl RankingStrategy for GenreSimilarityRanker {
    fn rank<'a>(
        &self,
        catalog: &'a Catalog,
        query: &RecommendationQuery,
    ) -> AppResult<RecommendationResult<'a>> {
        if query.kind != QueryKind::TitleLookup {
            tracing::debug!(kind = %query.kind, "Similarity ranking only supports title lookups");
            return Ok(Vec::new());
        }

        let Some((anchor_idx, _)) = catalog.find_by_title(&query.value) else {
            tracing::debug!(title = %query.value, "Title not in catalog");
            return Ok(Vec::new());
        };

        let scores = catalog.genre_matrix().similarities_to(anchor_idx).ok_or_else(|| {
            AppError::Internal(format!(
                "genre matrix has no row {} for a catalog of {} movies",
                anchor_idx,
                catalog.len()
            ))
        })?;

        let mut ranked: Vec<(usize, f64)> = scores.into_iter().enumerate().collect();
        // stable: equal scores keep catalog order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let movies = catalog.movies();
        let mut result = Vec::with_capacity(query.limit.min(ranked.len()));
        for (idx, score) in ranked {
            if result.len() == query.limit {
                break;
            }
            let movie = movies.get(idx).ok_or_else(|| {
                AppError::Internal(format!("genre matrix row {} has no catalog record", idx))
            })?;
            if idx == anchor_idx {
                continue;
            }
            result.push(Recommendation::scored(movie, round_score(score)));
        }

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "genre_similarity"
    }
}
