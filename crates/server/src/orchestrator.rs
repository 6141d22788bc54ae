//! # Query Orchestrator
//!
//! Coordinates one query end to end:
//! 1. Look up the request's cache key
//! 2. On a miss, fetch every record from the source
//! 3. Run the aggregation on the blocking pool
//! 4. Store the response so later callers with the same key reuse it
//!
//! Listing queries skip the cache: they depend on arbitrary filter input and
//! are cheap enough to recompute.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument};

use data_loader::{DataFormat, Year};
use pipeline::{
    movies_by_year, query_movies, CreditScope, IntervalWinResult, MoviePage, MovieQuery,
    MovieView,
};

use crate::cache::SingleFlightCache;
use crate::error::{QueryError, Result};
use crate::request::{AggregateRequest, AggregateResponse, Projection, StudiosResponse, YearsResponse};
use crate::source::{FileSource, MovieSource};

/// Where and how the orchestrator reads its records
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub data_path: PathBuf,
    /// Explicit format; detected from the extension when `None`
    pub format: Option<DataFormat>,
    /// Simulated latency slept before every fetch
    pub latency: Duration,
}

impl OrchestratorConfig {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            format: None,
            latency: Duration::ZERO,
        }
    }

    /// Build the file source this configuration describes
    pub fn file_source(&self) -> FileSource {
        let source = FileSource::new(&self.data_path).with_latency(self.latency);
        match self.format {
            Some(format) => source.with_format(format),
            None => source,
        }
    }
}

/// Serves aggregation and listing queries over one record source
pub struct QueryOrchestrator<S> {
    source: Arc<S>,
    cache: Arc<SingleFlightCache<AggregateResponse, QueryError>>,
}

impl<S> Clone for QueryOrchestrator<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl QueryOrchestrator<FileSource> {
    /// Create an orchestrator reading from the configured file
    pub fn from_config(config: &OrchestratorConfig) -> Self {
        Self::new(config.file_source())
    }
}

impl<S: MovieSource> QueryOrchestrator<S> {
    /// Create an orchestrator with an empty cache
    pub fn new(source: S) -> Self {
        info!("Creating query orchestrator over {}", source.describe());
        Self {
            source: Arc::new(source),
            cache: Arc::new(SingleFlightCache::new()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run an aggregation, reusing the cached response for its key.
    ///
    /// Concurrent calls with the same key share a single fetch and
    /// computation. A failed fetch is returned to every caller that joined
    /// it and nothing is cached, so the next call retries.
    #[instrument(skip(self))]
    pub async fn aggregate(&self, request: AggregateRequest) -> Result<AggregateResponse> {
        let start_time = Instant::now();
        let key = request.cache_key();
        let source = &self.source;

        let response = self
            .cache
            .get_or_try_init(&key, move || async move {
                let movies = source.fetch().await?;
                debug!("Computing {} over {} records", request.projection(), movies.len());
                let response =
                    tokio::task::spawn_blocking(move || request.compute(&movies)).await?;
                Ok::<_, QueryError>(response)
            })
            .await?;

        info!("Served {} in {:.2?}", key, start_time.elapsed());
        Ok(response)
    }

    /// Run the aggregation named by a raw projection string.
    ///
    /// Unknown projections fail before the source is touched.
    pub async fn aggregate_projection(&self, projection: &str) -> Result<AggregateResponse> {
        let projection: Projection = projection.parse()?;
        self.aggregate(projection.into()).await
    }

    /// Producer credits per year, counting every record
    pub async fn years_with_multiple_winners(&self) -> Result<YearsResponse> {
        self.years_with_multiple_winners_in(CreditScope::AllCredits)
            .await
    }

    /// Producer credits per year under an explicit credit scope
    pub async fn years_with_multiple_winners_in(&self, scope: CreditScope) -> Result<YearsResponse> {
        self.aggregate(AggregateRequest::YearsWithMultipleWinners { scope })
            .await?
            .into_years()
    }

    pub async fn studios_with_win_count(&self) -> Result<StudiosResponse> {
        self.aggregate(AggregateRequest::StudiosWithWinCount)
            .await?
            .into_studios()
    }

    pub async fn interval_win(&self) -> Result<IntervalWinResult> {
        self.aggregate(AggregateRequest::MaxMinWinIntervalForProducers)
            .await?
            .into_interval_win()
    }

    /// Filtered, paginated listing (never cached)
    #[instrument(skip(self))]
    pub async fn movies(&self, query: MovieQuery) -> Result<MoviePage> {
        let movies = self.source.fetch().await?;
        let page = tokio::task::spawn_blocking(move || query_movies(&movies, &query)).await?;
        debug!(
            "Listing page {} holds {} of {} movies",
            page.number, page.number_of_elements, page.total_elements
        );
        Ok(page)
    }

    /// Movies of one year with the given winner flag (never cached)
    pub async fn movies_by_year(&self, year: Year, winner: bool) -> Result<Vec<MovieView>> {
        let movies = self.source.fetch().await?;
        Ok(movies_by_year(&movies, year, winner))
    }

    /// Number of aggregation responses currently cached
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    /// Forget every cached response
    pub fn clear_cache(&self) {
        info!("Clearing {} cached responses", self.cache.len());
        self.cache.clear();
    }
}
