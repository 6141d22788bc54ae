//! Win count per studio and the top-studios view.

use data_loader::MovieRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of records crediting a studio
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioWinCount {
    pub name: String,
    pub win_count: usize,
}

/// Count (record, studio) pairs per parsed studio name.
///
/// The winner flag is ignored. Studios appear in the order they are first
/// seen in `movies`.
pub fn aggregate_by_studio(movies: &[MovieRecord]) -> Vec<StudioWinCount> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<StudioWinCount> = Vec::new();

    for movie in movies {
        for studio in movie.studio_names() {
            match positions.get(&studio) {
                Some(&pos) => counts[pos].win_count += 1,
                None => {
                    positions.insert(studio.clone(), counts.len());
                    counts.push(StudioWinCount {
                        name: studio,
                        win_count: 1,
                    });
                }
            }
        }
    }

    counts
}

/// The `n` studios with the highest counts.
///
/// Sorting is stable, so ties keep their first-occurrence order.
pub fn top_studios(mut counts: Vec<StudioWinCount>, n: usize) -> Vec<StudioWinCount> {
    counts.sort_by(|a, b| b.win_count.cmp(&a.win_count));
    counts.truncate(n);
    counts
}
