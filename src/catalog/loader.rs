use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use csv::{ReaderBuilder, StringRecord};
use regex::Regex;

use crate::{error::DataLoadError, models::MovieRecord};

/// Columns every catalog file must provide
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "title", "director", "genre", "poster", "rating", "year", "duration", "language",
];

/// Columns read when present
pub const OPTIONAL_COLUMNS: [&str; 1] = ["link"];

/// Reads a catalog file from disk
pub fn load_path(path: &Path, genre_delimiter: char) -> Result<Vec<MovieRecord>, DataLoadError> {
    let file = fs::File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_reader(file, genre_delimiter)
}

/// Reads CSV catalog rows (with a header line) into movie records
pub fn load_reader<R: Read>(
    reader: R,
    genre_delimiter: char,
) -> Result<Vec<MovieRecord>, DataLoadError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut movies = Vec::new();
    for row in reader.records() {
        let row = row?;
        movies.push(columns.movie(&row, genre_delimiter));
    }

    Ok(movies)
}

/// Maps known column names to their position in the header
struct ColumnIndex(HashMap<&'static str, usize>);

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, DataLoadError> {
        let positions: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().to_lowercase(), idx))
            .collect();

        let mut index = HashMap::new();
        let mut missing = Vec::new();
        for column in REQUIRED_COLUMNS {
            match positions.get(column) {
                Some(&idx) => {
                    index.insert(column, idx);
                }
                None => missing.push(column.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(DataLoadError::MissingColumns(missing));
        }

        for column in OPTIONAL_COLUMNS {
            if let Some(&idx) = positions.get(column) {
                index.insert(column, idx);
            }
        }

        Ok(Self(index))
    }

    /// Cell value for a column; short rows read as empty
    fn cell<'r>(&self, row: &'r StringRecord, column: &str) -> &'r str {
        self.0
            .get(column)
            .and_then(|&idx| row.get(idx))
            .unwrap_or("")
    }

    fn movie(&self, row: &StringRecord, genre_delimiter: char) -> MovieRecord {
        let genre_raw = self.cell(row, "genre").to_string();
        MovieRecord {
            title: self.cell(row, "title").to_string(),
            director: self.cell(row, "director").to_string(),
            genre_set: parse_genres(&genre_raw, genre_delimiter),
            genre_raw,
            poster: normalize_poster(self.cell(row, "poster")),
            rating: self.cell(row, "rating").to_string(),
            year: self.cell(row, "year").to_string(),
            duration: self.cell(row, "duration").to_string(),
            language: self.cell(row, "language").to_string(),
            link: self.cell(row, "link").to_string(),
        }
    }
}

fn poster_wrapper() -> &'static Regex {
    static WRAPPER: OnceLock<Regex> = OnceLock::new();
    WRAPPER.get_or_init(|| Regex::new(r"\((.*?)\)").expect("poster pattern is valid"))
}

/// Strips a `text(url)` wrapper down to the bare URL.
///
/// Values without a parenthesized group pass through unchanged. The captured
/// URL never contains `)`, so normalizing twice gives the same result.
pub fn normalize_poster(raw: &str) -> String {
    match poster_wrapper().captures(raw).and_then(|caps| caps.get(1)) {
        Some(url) => url.as_str().to_string(),
        None => raw.to_string(),
    }
}

/// Splits a raw genre string into lowercased, trimmed, non-empty tokens
pub fn parse_genres(raw: &str, delimiter: char) -> BTreeSet<String> {
    raw.split(delimiter)
        .map(|genre| genre.trim().to_lowercase())
        .filter(|genre| !genre.is_empty())
        .collect()
}
