//! Filter implementations for the movie listing.
//!
//! This module contains all the concrete filters that can be composed
//! into a FilterPipeline.

pub mod contains;
pub mod winner;
pub mod year;

// Re-export for convenience
pub use contains::{ContainsFilter, TextField};
pub use winner::WinnerFilter;
pub use year::YearFilter;
