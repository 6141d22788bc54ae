//! Movie listing queries.
//!
//! `query_movies` filters records with a `FilterPipeline` and cuts one page
//! out of the result; `movies_by_year` backs the "winners of year X" lookup.

use crate::filter_pipeline::FilterPipeline;
use crate::pagination::Page;
use data_loader::{MovieId, MovieRecord, Year};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Optional, AND-combined listing parameters.
///
/// `title`, `studios` and `producers` match case-insensitively as substrings
/// of the raw fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieQuery {
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub winner: Option<bool>,
    pub year: Option<Year>,
    pub title: Option<String>,
    pub studios: Option<String>,
    pub producers: Option<String>,
}

/// A movie as returned to consumers: credit strings expanded into names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieView {
    pub id: MovieId,
    pub year: Year,
    pub title: String,
    pub studios: Vec<String>,
    pub producers: Vec<String>,
    pub winner: bool,
}

impl From<&MovieRecord> for MovieView {
    fn from(movie: &MovieRecord) -> Self {
        Self {
            id: movie.id,
            year: movie.year,
            title: movie.title.clone(),
            studios: movie.studio_names(),
            producers: movie.producer_names(),
            winner: movie.winner,
        }
    }
}

/// One page of the movie listing
pub type MoviePage = Page<MovieView>;

/// Filter and paginate movies.
pub fn query_movies(movies: &[MovieRecord], query: &MovieQuery) -> MoviePage {
    let matching = FilterPipeline::from_query(query).apply(movies);
    debug!(
        "Movie query matched {} of {} records",
        matching.len(),
        movies.len()
    );
    Page::from_slice(&matching, query.page, query.size, |movie| MovieView::from(*movie))
}

/// All movies of a given year with the given winner flag, in input order
pub fn movies_by_year(movies: &[MovieRecord], year: Year, winner: bool) -> Vec<MovieView> {
    movies
        .iter()
        .filter(|movie| movie.year == year && movie.winner == winner)
        .map(MovieView::from)
        .collect()
}
