use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use tracing::instrument;

use crate::{error::DataLoadError, models::MovieRecord};

pub mod genre_matrix;
pub mod loader;

pub use genre_matrix::GenreMatrix;

/// Immutable, ordered snapshot of every movie the service knows about.
///
/// Built once at startup and shared by reference with every request. The
/// genre matrix used for similarity ranking is computed on first use and
/// cached for the life of the catalog.
#[derive(Debug)]
pub struct Catalog {
    movies: Vec<MovieRecord>,
    genre_matrix: OnceLock<GenreMatrix>,
}

impl Catalog {
    pub fn new(movies: Vec<MovieRecord>) -> Self {
        Self {
            movies,
            genre_matrix: OnceLock::new(),
        }
    }

    /// Loads the catalog from a CSV file
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>, genre_delimiter: char) -> Result<Self, DataLoadError> {
        let movies = loader::load_path(path.as_ref(), genre_delimiter)?;
        tracing::info!(movies = movies.len(), "Catalog loaded");
        if movies.is_empty() {
            tracing::warn!("Catalog contains no movies");
        }
        Ok(Self::new(movies))
    }

    /// Loads the catalog from any CSV source
    pub fn from_reader<R: Read>(reader: R, genre_delimiter: char) -> Result<Self, DataLoadError> {
        Ok(Self::new(loader::load_reader(reader, genre_delimiter)?))
    }

    /// Records in catalog order
    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// First record whose title matches case-insensitively, with its position
    pub fn find_by_title(&self, title: &str) -> Option<(usize, &MovieRecord)> {
        let title = title.to_lowercase();
        self.movies
            .iter()
            .enumerate()
            .find(|(_, movie)| movie.title.to_lowercase() == title)
    }

    /// Genre-presence matrix for the whole catalog, built on first call
    pub fn genre_matrix(&self) -> &GenreMatrix {
        self.genre_matrix.get_or_init(|| {
            let matrix = GenreMatrix::build(&self.movies);
            tracing::debug!(
                rows = matrix.row_count(),
                genres = matrix.genres().len(),
                "Built genre matrix"
            );
            matrix
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = "\
title,director,genre,poster,rating,year,duration,language
Inception,Christopher Nolan,\"Action,Sci-Fi\",,8.8,2010,148,English
Interstellar,Christopher Nolan,\"Sci-Fi,Drama\",,8.7,2014,169,English
inception,Someone Else,Documentary,,6.0,2011,90,English
";

    #[test]
    fn test_find_by_title_returns_first_match() {
        let catalog = Catalog::from_reader(CATALOG.as_bytes(), ',').unwrap();
        let (idx, movie) = catalog.find_by_title("INCEPTION").unwrap();
        assert_eq!(idx, 0);
        assert_eq!(movie.director, "Christopher Nolan");
    }

    #[test]
    fn test_find_by_title_missing() {
        let catalog = Catalog::from_reader(CATALOG.as_bytes(), ',').unwrap();
        assert!(catalog.find_by_title("Tenet").is_none());
    }

    #[test]
    fn test_duplicates_are_retained_in_order() {
        let catalog = Catalog::from_reader(CATALOG.as_bytes(), ',').unwrap();
        assert_eq!(catalog.len(), 3);
        let titles: Vec<&str> = catalog.movies().iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["Inception", "Interstellar", "inception"]);
    }

    #[test]
    fn test_genre_matrix_is_cached() {
        let catalog = Catalog::from_reader(CATALOG.as_bytes(), ',').unwrap();
        let first = catalog.genre_matrix() as *const GenreMatrix;
        let second = catalog.genre_matrix() as *const GenreMatrix;
        assert_eq!(first, second);
        assert_eq!(catalog.genre_matrix().row_count(), 3);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new(Vec::new());
        assert!(catalog.is_empty());
        assert!(catalog.find_by_title("anything").is_none());
    }
}
