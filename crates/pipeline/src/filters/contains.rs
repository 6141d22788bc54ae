//! Case-insensitive substring filter on a raw text field.
//!
//! Matching runs against the raw, undelimited string (`"A, B and C"`), not
//! against the parsed name list, so a needle may span a separator.

use crate::traits::MovieFilter;
use data_loader::MovieRecord;

/// Text field a ContainsFilter inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Title,
    Studios,
    Producers,
}

impl TextField {
    fn value(self, movie: &MovieRecord) -> &str {
        match self {
            TextField::Title => &movie.title,
            TextField::Studios => &movie.studios,
            TextField::Producers => &movie.producers,
        }
    }
}

/// Keeps records whose field contains the needle, ignoring case.
pub struct ContainsFilter {
    field: TextField,
    /// Needle, already lowercased
    needle: String,
}

impl ContainsFilter {
    pub fn new(field: TextField, needle: &str) -> Self {
        Self {
            field,
            needle: needle.to_lowercase(),
        }
    }
}

impl MovieFilter for ContainsFilter {
    fn name(&self) -> &str {
        match self.field {
            TextField::Title => "TitleContainsFilter",
            TextField::Studios => "StudiosContainsFilter",
            TextField::Producers => "ProducersContainsFilter",
        }
    }

    fn apply<'a>(&self, movies: Vec<&'a MovieRecord>) -> Vec<&'a MovieRecord> {
        movies
            .into_iter()
            .filter(|movie| {
                self.field
                    .value(movie)
                    .to_lowercase()
                    .contains(&self.needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u32, title: &str, studios: &str, producers: &str) -> MovieRecord {
        MovieRecord {
            id,
            year: 1984,
            title: title.to_string(),
            studios: studios.to_string(),
            producers: producers.to_string(),
            winner: false,
        }
    }

    #[test]
    fn test_contains_ignores_case() {
        let movies = vec![
            movie(1, "Bolero", "Cannon Films", "Bo Derek"),
            movie(2, "Sheena", "Columbia Pictures", "Paul Aratow"),
        ];
        let refs: Vec<&MovieRecord> = movies.iter().collect();

        let filtered = ContainsFilter::new(TextField::Title, "BOL").apply(refs.clone());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);

        let filtered = ContainsFilter::new(TextField::Studios, "columbia").apply(refs);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }

    #[test]
    fn test_contains_matches_across_separators() {
        let movies = vec![movie(1, "T", "S", "Allan Carr and Jerry Weintraub")];
        let refs: Vec<&MovieRecord> = movies.iter().collect();

        let filtered = ContainsFilter::new(TextField::Producers, "carr and jerry").apply(refs);
        assert_eq!(filtered.len(), 1);
    }
}
