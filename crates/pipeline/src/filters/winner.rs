//! Filter on the winner flag.

use crate::traits::MovieFilter;
use data_loader::MovieRecord;

/// Keeps records whose winner flag equals the requested value.
pub struct WinnerFilter {
    winner: bool,
}

impl WinnerFilter {
    pub fn new(winner: bool) -> Self {
        Self { winner }
    }
}

impl MovieFilter for WinnerFilter {
    fn name(&self) -> &str {
        "WinnerFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a MovieRecord>) -> Vec<&'a MovieRecord> {
        movies
            .into_iter()
            .filter(|movie| movie.winner == self.winner)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u32, winner: bool) -> MovieRecord {
        MovieRecord {
            id,
            year: 1990,
            title: format!("Movie {}", id),
            studios: "S".to_string(),
            producers: "P".to_string(),
            winner,
        }
    }

    #[test]
    fn test_winner_filter() {
        let movies = vec![movie(1, true), movie(2, false), movie(3, true)];
        let refs: Vec<&MovieRecord> = movies.iter().collect();

        let winners = WinnerFilter::new(true).apply(refs.clone());
        assert_eq!(winners.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 3]);

        let losers = WinnerFilter::new(false).apply(refs);
        assert_eq!(losers.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2]);
    }
}
