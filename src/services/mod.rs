pub mod formatter;
pub mod ranking;
pub mod recommendations;

pub use ranking::{AttributeMatcher, GenreSimilarityRanker, RankingStrategy};
