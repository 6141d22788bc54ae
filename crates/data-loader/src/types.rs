//! Core domain types for movie-award records.
//!
//! - `MovieRecord`: one nominated movie, with its credits kept as raw strings
//! - `MovieCatalog`: the in-memory store every view is computed from

use crate::error::{DataLoadError, Result};
use crate::names::parse_names;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier assigned in parse order, starting at 1
pub type MovieId = u32;

/// Award year. A year that fails to parse is stored as 0.
pub type Year = i32;

// =============================================================================
// MovieRecord
// =============================================================================

/// A single nominated movie.
///
/// `studios` and `producers` hold the raw, delimiter-separated credit strings.
/// Use [`MovieRecord::studio_names`] and [`MovieRecord::producer_names`] to
/// get the parsed name lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub year: Year,
    pub title: String,
    pub studios: String,
    pub producers: String,
    pub winner: bool,
}

impl MovieRecord {
    /// Parsed studio names, recomputed on every call
    pub fn studio_names(&self) -> Vec<String> {
        parse_names(&self.studios)
    }

    /// Parsed producer names, recomputed on every call
    pub fn producer_names(&self) -> Vec<String> {
        parse_names(&self.producers)
    }
}

// =============================================================================
// MovieCatalog - The In-Memory Store
// =============================================================================

/// Holds every loaded record in id order, plus a year index.
///
/// Records are never mutated after insertion; aggregation code borrows
/// `movies()` as a slice.
#[derive(Debug, Clone, Default)]
pub struct MovieCatalog {
    pub(crate) movies: Vec<MovieRecord>,
    /// Position in `movies` for each id
    pub(crate) positions: HashMap<MovieId, usize>,
    /// Movie ids grouped by award year (sorted by year)
    pub(crate) year_index: BTreeMap<Year, Vec<MovieId>>,
}

impl MovieCatalog {
    /// Creates a new, empty catalog
    pub fn new() -> Self {
        Self {
            movies: Vec::new(),
            positions: HashMap::new(),
            year_index: BTreeMap::new(),
        }
    }

    /// Build a catalog from already-parsed records, rejecting duplicate ids
    pub fn from_records(records: Vec<MovieRecord>) -> Result<Self> {
        let mut catalog = Self::new();
        for record in records {
            catalog.insert_movie(record)?;
        }
        Ok(catalog)
    }

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&MovieRecord> {
        self.positions.get(&id).map(|&pos| &self.movies[pos])
    }

    /// All records in insertion order
    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// Ids of all movies from a given year
    pub fn get_movies_by_year(&self, year: Year) -> &[MovieId] {
        self.year_index
            .get(&year)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Distinct years present, ascending
    pub fn years(&self) -> impl Iterator<Item = Year> + '_ {
        self.year_index.keys().copied()
    }

    /// Insert a record and update the year index
    pub fn insert_movie(&mut self, movie: MovieRecord) -> Result<()> {
        if self.positions.contains_key(&movie.id) {
            return Err(DataLoadError::DuplicateId { id: movie.id });
        }
        self.positions.insert(movie.id, self.movies.len());
        self.year_index
            .entry(movie.year)
            .or_insert_with(Vec::new)
            .push(movie.id);
        self.movies.push(movie);
        Ok(())
    }

    /// Get counts for debugging/validation: (movies, winners, distinct years)
    pub fn counts(&self) -> (usize, usize, usize) {
        let winners = self.movies.iter().filter(|m| m.winner).count();
        (self.movies.len(), winners, self.year_index.len())
    }

    /// Consume the catalog, returning the records in insertion order
    pub fn into_movies(self) -> Vec<MovieRecord> {
        self.movies
    }
}
