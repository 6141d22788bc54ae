//! Building a `MovieCatalog` from data files.
//!
//! - Pick the parser from the file extension
//! - Insert records, building the year index
//! - Validate data quality before anything is aggregated

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::info;

/// Supported data file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Json,
}

impl DataFormat {
    /// Guess the format from a file extension; anything but `.json` is CSV
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DataFormat::Json,
            _ => DataFormat::Csv,
        }
    }
}

/// Read and parse a data file in the given format
pub fn read_records(path: &Path, format: DataFormat) -> Result<Vec<MovieRecord>> {
    match format {
        DataFormat::Csv => parser::read_csv_file(path),
        DataFormat::Json => parser::read_json_file(path),
    }
}

impl MovieCatalog {
    /// Load a catalog from a CSV or JSON file
    ///
    /// Steps:
    /// 1. Parse the file (format chosen by extension)
    /// 2. Insert every record, rejecting duplicate ids
    /// 3. Validate data quality
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::load_from_file_as(path, DataFormat::from_path(path))
    }

    /// Load a catalog from a file in an explicit format
    pub fn load_from_file_as(path: &Path, format: DataFormat) -> Result<Self> {
        info!("Loading {:?} movie records from {:?}", format, path);

        let records = read_records(path, format)?;
        let catalog = Self::from_records(records)?;
        catalog.validate()?;

        let (movies, winners, years) = catalog.counts();
        info!(
            "Loaded {} movies ({} winners) across {} years",
            movies, winners, years
        );
        Ok(catalog)
    }

    /// Validate data quality
    ///
    /// Check that:
    /// - Every record has a non-blank title
    /// - No year is negative
    ///
    /// Returns Ok(()) if valid, Err on the first offending record
    pub fn validate(&self) -> Result<()> {
        for movie in &self.movies {
            if movie.title.trim().is_empty() {
                return Err(DataLoadError::ValidationError(format!(
                    "movie {} has a blank title",
                    movie.id
                )));
            }
            if movie.year < 0 {
                return Err(DataLoadError::ValidationError(format!(
                    "movie {} has negative year {}",
                    movie.id, movie.year
                )));
            }
        }
        Ok(())
    }
}
