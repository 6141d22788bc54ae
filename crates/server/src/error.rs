//! Error types for query orchestration.

use std::sync::Arc;

use data_loader::DataLoadError;
use thiserror::Error;

/// Errors surfaced to callers of the orchestrator.
///
/// Cheap to clone: callers that joined the same in-flight query all receive
/// the same error.
#[derive(Error, Debug, Clone)]
pub enum QueryError {
    /// The projection discriminator is not one the engine knows
    #[error("Invalid projection: {0}")]
    InvalidProjection(String),

    /// The record source failed (I/O, parse, validation)
    #[error("Failed to fetch movies: {0}")]
    Source(#[source] Arc<DataLoadError>),

    /// A computation returned a different shape than its request declares
    #[error("Expected a {expected} response")]
    UnexpectedShape { expected: &'static str },

    /// The blocking computation task panicked or was cancelled
    #[error("Query task failed: {0}")]
    Task(#[source] Arc<tokio::task::JoinError>),
}

impl From<DataLoadError> for QueryError {
    fn from(err: DataLoadError) -> Self {
        QueryError::Source(Arc::new(err))
    }
}

impl From<tokio::task::JoinError> for QueryError {
    fn from(err: tokio::task::JoinError) -> Self {
        QueryError::Task(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
