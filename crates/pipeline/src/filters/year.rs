//! Filter on the exact award year.

use crate::traits::MovieFilter;
use data_loader::{MovieRecord, Year};

/// Keeps records from exactly one year.
pub struct YearFilter {
    year: Year,
}

impl YearFilter {
    pub fn new(year: Year) -> Self {
        Self { year }
    }
}

impl MovieFilter for YearFilter {
    fn name(&self) -> &str {
        "YearFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a MovieRecord>) -> Vec<&'a MovieRecord> {
        movies
            .into_iter()
            .filter(|movie| movie.year == self.year)
            .collect()
    }
}
