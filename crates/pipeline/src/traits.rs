//! Core traits for the filtering pipeline.
//!
//! This module defines the MovieFilter trait that lets the movie listing
//! compose independent, AND-combined predicates.

use data_loader::MovieRecord;

/// Core trait for filtering movie records.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across query tasks
/// - Filters take ownership of the borrowed records and return the survivors,
///   so no record is ever cloned while filtering
pub trait MovieFilter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter, keeping input order
    fn apply<'a>(&self, movies: Vec<&'a MovieRecord>) -> Vec<&'a MovieRecord>;
}
