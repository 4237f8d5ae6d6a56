use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt::Display};

/// One movie in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    pub title: String,
    pub director: String,
    /// Genre names exactly as they appear in the catalog
    pub genre_raw: String,
    /// Lowercased, trimmed genre tokens derived from `genre_raw`
    pub genre_set: BTreeSet<String>,
    /// Bare poster URL, empty when the catalog has none
    pub poster: String,
    pub rating: String,
    pub year: String,
    pub duration: String,
    pub language: String,
    /// Optional external link; empty when the catalog has no `link` column
    pub link: String,
}

impl MovieRecord {
    /// Case-insensitive title comparison
    pub fn has_title(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }

    /// Case-insensitive director comparison
    pub fn has_director(&self, director: &str) -> bool {
        self.director.to_lowercase() == director.to_lowercase()
    }

    /// True when both records list at least one genre in common
    pub fn shares_genre_with(&self, other: &MovieRecord) -> bool {
        !self.genre_set.is_disjoint(&other.genre_set)
    }
}

/// Which catalog field a lookup query is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Find movies related to the movie with this title
    TitleLookup,
    /// Find movies by this director
    DirectorLookup,
}

impl QueryKind {
    /// Parses the `type` label sent by clients ("movie title" or "director").
    ///
    /// Returns `None` for any other label; callers answer those with an
    /// empty result rather than an error.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "movie title" => Some(QueryKind::TitleLookup),
            "director" => Some(QueryKind::DirectorLookup),
            _ => None,
        }
    }
}

impl Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryKind::TitleLookup => write!(f, "movie title"),
            QueryKind::DirectorLookup => write!(f, "director"),
        }
    }
}

/// A single recommendation request against the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationQuery {
    pub kind: QueryKind,
    pub value: String,
    pub limit: usize,
}

impl RecommendationQuery {
    pub fn new(kind: QueryKind, value: impl Into<String>, limit: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            limit,
        }
    }

    pub fn title(value: impl Into<String>, limit: usize) -> Self {
        Self::new(QueryKind::TitleLookup, value, limit)
    }

    pub fn director(value: impl Into<String>, limit: usize) -> Self {
        Self::new(QueryKind::DirectorLookup, value, limit)
    }
}

/// Flat movie shape returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieEntry {
    pub title: String,
    pub director: String,
    pub genre: String,
    pub poster: String,
    pub rating: String,
    pub year: String,
    pub duration: String,
    pub language: String,
    /// Genre cosine similarity to the queried movie, rounded to 3 places
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    /// External link, only on similarity-ranked entries whose record has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Response body for the recommendation endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub movies: Vec<MovieEntry>,
}
