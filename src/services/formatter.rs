use crate::models::{MovieEntry, MovieRecord};

use super::ranking::{Recommendation, RecommendationResult};

impl From<&MovieRecord> for MovieEntry {
    fn from(movie: &MovieRecord) -> Self {
        Self {
            title: movie.title.clone(),
            director: movie.director.clone(),
            genre: movie.genre_raw.clone(),
            poster: movie.poster.clone(),
            rating: movie.rating.clone(),
            year: movie.year.clone(),
            duration: movie.duration.clone(),
            language: movie.language.clone(),
            similarity: None,
            link: None,
        }
    }
}

impl From<&Recommendation<'_>> for MovieEntry {
    fn from(rec: &Recommendation<'_>) -> Self {
        // links only accompany similarity-ranked entries
        let link = rec
            .similarity
            .and(Some(&rec.movie.link))
            .filter(|link| !link.is_empty())
            .cloned();
        Self {
            similarity: rec.similarity,
            link,
            ..MovieEntry::from(rec.movie)
        }
    }
}

/// Projects ranked records into the flat shape returned to clients
pub fn format(result: &RecommendationResult<'_>) -> Vec<MovieEntry> {
    result.iter().map(MovieEntry::from).collect()
}
