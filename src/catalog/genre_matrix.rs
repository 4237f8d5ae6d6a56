use std::collections::BTreeSet;

use crate::models::MovieRecord;

/// Binary genre-presence matrix over a catalog.
///
/// Row `i` corresponds to the `i`-th catalog record and column `j` to the
/// `j`-th genre in `genres` (the sorted union of every record's genre set).
/// A cell is 1 when the record lists that genre.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreMatrix {
    genres: Vec<String>,
    rows: Vec<Vec<u8>>,
}

impl GenreMatrix {
    pub fn build(movies: &[MovieRecord]) -> Self {
        let genres: Vec<String> = movies
            .iter()
            .flat_map(|movie| movie.genre_set.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let rows = movies
            .iter()
            .map(|movie| {
                genres
                    .iter()
                    .map(|genre| u8::from(movie.genre_set.contains(genre)))
                    .collect()
            })
            .collect();

        Self { genres, rows }
    }

    /// Column labels
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn row(&self, idx: usize) -> Option<&[u8]> {
        self.rows.get(idx).map(Vec::as_slice)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cosine similarity between two rows, or `None` if either index is out of range
    #[cfg(test)]
    pub(crate) fn similarity(&self, a: usize, b: usize) -> Option<f64> {
        Some(cosine_similarity(self.row(a)?, self.row(b)?))
    }

    /// Similarity of `idx` against every row, in row order
    pub fn similarities_to(&self, idx: usize) -> Option<Vec<f64>> {
        let query = self.row(idx)?;
        Some(
            self.rows
                .iter()
                .map(|row| cosine_similarity(query, row))
                .collect(),
        )
    }
}

/// `a·b / (|a||b|)`, defined as 0 when either vector is all zeros
pub fn cosine_similarity(a: &[u8], b: &[u8]) -> f64 {
    let mut dot = 0u64;
    let mut norm_a = 0u64;
    let mut norm_b = 0u64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (u64::from(x), u64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0 || norm_b == 0 {
        return 0.0;
    }

    dot as f64 / ((norm_a as f64).sqrt() * (norm_b as f64).sqrt())
}
