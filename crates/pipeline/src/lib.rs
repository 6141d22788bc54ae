//! Aggregation engine for movie-award records.
//!
//! This crate provides four independent views over a slice of records:
//! - Paginated, filtered movie listing (`query_movies`)
//! - Producer credits per year (`aggregate_by_year`)
//! - Win count per studio (`aggregate_by_studio`, `top_studios`)
//! - Min/max producer win intervals (`analyze_intervals`)
//!
//! Every function is pure: it borrows the records, never mutates them and
//! keeps no state between calls.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{analyze_intervals, query_movies, MovieQuery};
//!
//! let intervals = analyze_intervals(catalog.movies());
//! let page = query_movies(catalog.movies(), &MovieQuery {
//!     winner: Some(true),
//!     ..Default::default()
//! });
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod pagination;
pub mod query;
pub mod years;
pub mod studios;
pub mod intervals;

// Re-export main types
pub use traits::MovieFilter;
pub use filter_pipeline::FilterPipeline;
pub use pagination::{Page, Pageable, SortInfo, DEFAULT_PAGE_SIZE};
pub use query::{movies_by_year, query_movies, MoviePage, MovieQuery, MovieView};
pub use years::{aggregate_by_year, aggregate_by_year_with, CreditScope, YearWinnerCount};
pub use studios::{aggregate_by_studio, top_studios, StudioWinCount};
pub use intervals::{analyze_intervals, IntervalWinResult, ProducerInterval};
