//! Query orchestration for the award-stats engine.
//!
//! This crate sits between a record source and whoever renders the results:
//! it dispatches typed aggregation requests, memoizes their responses with a
//! single-flight cache and exposes the dashboard view models.

pub mod cache;
pub mod dashboard;
pub mod debounce;
pub mod error;
pub mod orchestrator;
pub mod request;
pub mod source;

pub use cache::SingleFlightCache;
pub use dashboard::{Dashboard, MoviesByYearSearch, MoviesTable, Panel, YearSearchState, TOP_STUDIOS};
pub use debounce::Debouncer;
pub use error::{QueryError, Result};
pub use orchestrator::{OrchestratorConfig, QueryOrchestrator};
pub use request::{AggregateRequest, AggregateResponse, Projection, StudiosResponse, YearsResponse};
pub use source::{FileSource, MovieSource, StaticSource};
