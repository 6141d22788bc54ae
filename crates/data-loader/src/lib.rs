//! # Data Loader Crate
//!
//! This crate loads movie-award records (Golden Raspberry style nominations)
//! into memory.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRecord, MovieCatalog)
//! - **names**: Split raw studio/producer credit strings into names
//! - **parser**: Parse `;`-separated CSV and JSON record arrays
//! - **index**: Build and validate a catalog from a data file
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::MovieCatalog;
//! use std::path::Path;
//!
//! let catalog = MovieCatalog::load_from_file(Path::new("data/movielist.csv"))?;
//! let movie = catalog.get_movie(1).unwrap();
//! println!("{} ({}) produced by {:?}", movie.title, movie.year, movie.producer_names());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod names;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::{DataFormat, read_records};
pub use names::parse_names;
pub use parser::{parse_csv, parse_json};
pub use types::{MovieCatalog, MovieId, MovieRecord, Year};
