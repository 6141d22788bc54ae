//! Producer win intervals.
//!
//! An interval is the gap in years between two consecutive wins of the same
//! producer. The analyzer reports every interval equal to the smallest gap and
//! every interval equal to the largest one.
//!
//! ## Algorithm
//! 1. Keep winning records, stable-sorted by year
//! 2. Append each record's year to the list of every producer it credits
//! 3. For producers with two or more wins, sort their years and emit one
//!    interval per consecutive pair
//! 4. Select the entries matching the global minimum and maximum

use data_loader::{MovieRecord, Year};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Gap between two consecutive wins of one producer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProducerInterval {
    pub producer: String,
    pub interval: Year,
    pub previous_win: Year,
    pub following_win: Year,
}

/// All intervals tied for the smallest and for the largest gap
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalWinResult {
    pub min: Vec<ProducerInterval>,
    pub max: Vec<ProducerInterval>,
}

/// Compute the min/max producer win intervals.
///
/// Producers are visited in order of their first win and intervals are
/// chronological within a producer; `min` and `max` keep that order. Two wins
/// in the same year give an interval of 0. Without any interval both lists are
/// empty.
pub fn analyze_intervals(movies: &[MovieRecord]) -> IntervalWinResult {
    let mut winners: Vec<&MovieRecord> = movies.iter().filter(|m| m.winner).collect();
    winners.sort_by_key(|m| m.year);

    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut wins: Vec<(String, Vec<Year>)> = Vec::new();
    for movie in &winners {
        for producer in movie.producer_names() {
            match positions.get(&producer) {
                Some(&pos) => wins[pos].1.push(movie.year),
                None => {
                    positions.insert(producer.clone(), wins.len());
                    wins.push((producer, vec![movie.year]));
                }
            }
        }
    }

    let intervals = producer_intervals(wins);
    debug!(
        "Computed {} producer intervals from {} winning movies",
        intervals.len(),
        winners.len()
    );

    let (Some(min), Some(max)) = (
        intervals.iter().map(|i| i.interval).min(),
        intervals.iter().map(|i| i.interval).max(),
    ) else {
        return IntervalWinResult::default();
    };

    IntervalWinResult {
        min: intervals.iter().filter(|i| i.interval == min).cloned().collect(),
        max: intervals.into_iter().filter(|i| i.interval == max).collect(),
    }
}

/// One interval per consecutive pair of wins, for producers with two or more
fn producer_intervals(wins: Vec<(String, Vec<Year>)>) -> Vec<ProducerInterval> {
    let mut intervals = Vec::new();

    for (producer, mut years) in wins {
        if years.len() < 2 {
            continue;
        }
        years.sort_unstable();
        for pair in years.windows(2) {
            intervals.push(ProducerInterval {
                producer: producer.clone(),
                interval: pair[1] - pair[0],
                previous_win: pair[0],
                following_win: pair[1],
            });
        }
    }

    intervals
}
