//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the FilterPipeline struct that chains filters
//! together using the builder pattern, plus the mapping from a `MovieQuery`
//! to the filters it implies.

use crate::filters::{ContainsFilter, TextField, WinnerFilter, YearFilter};
use crate::query::MovieQuery;
use crate::traits::MovieFilter;
use data_loader::MovieRecord;
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(WinnerFilter::new(true))
///     .add_filter(YearFilter::new(1986));
///
/// let matching = pipeline.apply(catalog.movies());
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn MovieFilter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Build the pipeline for a movie query.
    ///
    /// Filters are added in the order winner, year, title, studios, producers.
    /// Empty text needles add no filter.
    pub fn from_query(query: &MovieQuery) -> Self {
        let mut pipeline = Self::new();

        if let Some(winner) = query.winner {
            pipeline = pipeline.add_filter(WinnerFilter::new(winner));
        }
        if let Some(year) = query.year {
            pipeline = pipeline.add_filter(YearFilter::new(year));
        }

        let text_filters = [
            (TextField::Title, &query.title),
            (TextField::Studios, &query.studios),
            (TextField::Producers, &query.producers),
        ];
        for (field, needle) in text_filters {
            if let Some(needle) = needle.as_deref().filter(|n| !n.is_empty()) {
                pipeline = pipeline.add_filter(ContainsFilter::new(field, needle));
            }
        }

        pipeline
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl MovieFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Number of filters in the pipeline
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence, preserving input order.
    pub fn apply<'a>(&self, movies: &'a [MovieRecord]) -> Vec<&'a MovieRecord> {
        let mut current: Vec<&MovieRecord> = movies.iter().collect();
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movies() -> Vec<MovieRecord> {
        vec![
            MovieRecord {
                id: 1,
                year: 1986,
                title: "Howard the Duck".to_string(),
                studios: "Universal Studios".to_string(),
                producers: "Gloria Katz".to_string(),
                winner: true,
            },
            MovieRecord {
                id: 2,
                year: 1986,
                title: "Blue City".to_string(),
                studios: "Paramount Pictures".to_string(),
                producers: "William Hayward and Walter Hill".to_string(),
                winner: false,
            },
            MovieRecord {
                id: 3,
                year: 1987,
                title: "Leonard Part 6".to_string(),
                studios: "Columbia Pictures".to_string(),
                producers: "Bill Cosby".to_string(),
                winner: true,
            },
        ]
    }

    #[test]
    fn test_empty_pipeline() {
        let movies = movies();
        let pipeline = FilterPipeline::new();
        assert_eq!(pipeline.apply(&movies).len(), 3);
    }

    #[test]
    fn test_single_filter() {
        let movies = movies();
        let pipeline = FilterPipeline::new().add_filter(WinnerFilter::new(true));

        let filtered = pipeline.apply(&movies);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, 1);
        assert_eq!(filtered[1].id, 3);
    }

    #[test]
    fn test_from_query_combines_with_and() {
        let movies = movies();
        let query = MovieQuery {
            winner: Some(true),
            year: Some(1986),
            ..Default::default()
        };
        let pipeline = FilterPipeline::from_query(&query);
        assert_eq!(pipeline.len(), 2);

        let filtered = pipeline.apply(&movies);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn test_from_query_skips_empty_needles() {
        let query = MovieQuery {
            title: Some(String::new()),
            studios: Some("pictures".to_string()),
            ..Default::default()
        };
        let pipeline = FilterPipeline::from_query(&query);
        assert_eq!(pipeline.len(), 1);

        let movies = movies();
        let filtered = pipeline.apply(&movies);
        assert_eq!(filtered.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2, 3]);
    }
}
