//! Producer credits per year ("years with multiple winners").

use data_loader::{MovieRecord, Year};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of producer credits attributed to one year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearWinnerCount {
    pub year: Year,
    pub winner_count: usize,
}

/// Which records contribute credits to the year view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CreditScope {
    /// Every record counts, winner or not (the historical behaviour)
    #[default]
    AllCredits,
    /// Only winning records count
    WinnersOnly,
}

/// Count producer credits per year over every record.
///
/// See [`aggregate_by_year_with`].
pub fn aggregate_by_year(movies: &[MovieRecord]) -> Vec<YearWinnerCount> {
    aggregate_by_year_with(movies, CreditScope::AllCredits)
}

/// Count producer credits per year.
///
/// Each parsed producer name of each contributing record adds one to its
/// record's year. Years appear in the order they are first seen in `movies`;
/// a year only appears if at least one record contributes to it.
pub fn aggregate_by_year_with(movies: &[MovieRecord], scope: CreditScope) -> Vec<YearWinnerCount> {
    let mut positions: HashMap<Year, usize> = HashMap::new();
    let mut counts: Vec<YearWinnerCount> = Vec::new();

    for movie in movies {
        if scope == CreditScope::WinnersOnly && !movie.winner {
            continue;
        }
        let pos = *positions.entry(movie.year).or_insert_with(|| {
            counts.push(YearWinnerCount {
                year: movie.year,
                winner_count: 0,
            });
            counts.len() - 1
        });
        counts[pos].winner_count += movie.producer_names().len();
    }

    counts
}
