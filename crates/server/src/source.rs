//! Record sources.
//!
//! A source hands the orchestrator the complete record collection in one
//! asynchronous call. There is no streaming and no partial result.

use data_loader::{read_records, DataFormat, DataLoadError, MovieCatalog, MovieRecord};
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Anything that can produce the full set of movie records
pub trait MovieSource: Send + Sync + 'static {
    /// Fetch every record
    fn fetch(&self) -> impl Future<Output = data_loader::Result<Vec<MovieRecord>>> + Send;

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}

/// Reads a CSV or JSON file on every fetch.
///
/// An optional latency is slept before each read, standing in for the round
/// trip of the remote API during development.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: DataFormat,
    latency: Duration,
}

impl FileSource {
    /// Create a source, guessing the format from the file extension
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = DataFormat::from_path(&path);
        Self {
            path,
            format,
            latency: Duration::ZERO,
        }
    }

    /// Override the detected format
    pub fn with_format(mut self, format: DataFormat) -> Self {
        self.format = format;
        self
    }

    /// Configure the simulated latency (default: none)
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl MovieSource for FileSource {
    async fn fetch(&self) -> data_loader::Result<Vec<MovieRecord>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let path = self.path.clone();
        let format = self.format;
        let records = tokio::task::spawn_blocking(move || read_records(&path, format))
            .await
            .map_err(|e| DataLoadError::IoError(io::Error::other(e)))??;

        let catalog = MovieCatalog::from_records(records)?;
        catalog.validate()?;
        debug!("Fetched {} records from {}", catalog.movies().len(), self.describe());
        Ok(catalog.into_movies())
    }

    fn describe(&self) -> String {
        format!("{:?} file {}", self.format, self.path.display())
    }
}

/// Serves a fixed, in-memory collection
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    movies: Arc<Vec<MovieRecord>>,
}

impl StaticSource {
    pub fn new(movies: Vec<MovieRecord>) -> Self {
        Self {
            movies: Arc::new(movies),
        }
    }
}

impl From<MovieCatalog> for StaticSource {
    fn from(catalog: MovieCatalog) -> Self {
        Self::new(catalog.into_movies())
    }
}

impl MovieSource for StaticSource {
    async fn fetch(&self) -> data_loader::Result<Vec<MovieRecord>> {
        Ok(self.movies.as_ref().clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory records", self.movies.len())
    }
}
