//! Typed aggregation requests and responses.
//!
//! The awards API serves every aggregation from one endpoint and picks the
//! response shape with a `projection` query parameter. Here each projection is
//! a request variant with its own response type, and an unknown projection
//! string is rejected before any work is done.

use crate::error::QueryError;
use data_loader::MovieRecord;
use pipeline::{
    aggregate_by_studio, aggregate_by_year_with, analyze_intervals, CreditScope,
    IntervalWinResult, StudioWinCount, YearWinnerCount,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Projection discriminators understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Projection {
    YearsWithMultipleWinners,
    StudiosWithWinCount,
    MaxMinWinIntervalForProducers,
}

impl Projection {
    pub const ALL: [Projection; 3] = [
        Projection::YearsWithMultipleWinners,
        Projection::StudiosWithWinCount,
        Projection::MaxMinWinIntervalForProducers,
    ];

    /// Wire name of the projection
    pub fn as_str(&self) -> &'static str {
        match self {
            Projection::YearsWithMultipleWinners => "years-with-multiple-winners",
            Projection::StudiosWithWinCount => "studios-with-win-count",
            Projection::MaxMinWinIntervalForProducers => "max-min-win-interval-for-producers",
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Projection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Projection::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| QueryError::InvalidProjection(s.to_string()))
    }
}

/// One aggregation request per projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateRequest {
    YearsWithMultipleWinners { scope: CreditScope },
    StudiosWithWinCount,
    MaxMinWinIntervalForProducers,
}

impl From<Projection> for AggregateRequest {
    fn from(projection: Projection) -> Self {
        match projection {
            Projection::YearsWithMultipleWinners => AggregateRequest::YearsWithMultipleWinners {
                scope: CreditScope::AllCredits,
            },
            Projection::StudiosWithWinCount => AggregateRequest::StudiosWithWinCount,
            Projection::MaxMinWinIntervalForProducers => {
                AggregateRequest::MaxMinWinIntervalForProducers
            }
        }
    }
}

impl AggregateRequest {
    pub fn projection(&self) -> Projection {
        match self {
            AggregateRequest::YearsWithMultipleWinners { .. } => Projection::YearsWithMultipleWinners,
            AggregateRequest::StudiosWithWinCount => Projection::StudiosWithWinCount,
            AggregateRequest::MaxMinWinIntervalForProducers => {
                Projection::MaxMinWinIntervalForProducers
            }
        }
    }

    /// Canonical cache key: `projection=<name>`, plus the credit scope when
    /// it differs from the default
    pub fn cache_key(&self) -> String {
        let mut key = format!("projection={}", self.projection());
        if let AggregateRequest::YearsWithMultipleWinners {
            scope: CreditScope::WinnersOnly,
        } = self
        {
            key.push_str(";scope=winners-only");
        }
        key
    }

    /// Run the aggregation this request names
    pub fn compute(&self, movies: &[MovieRecord]) -> AggregateResponse {
        match *self {
            AggregateRequest::YearsWithMultipleWinners { scope } => {
                AggregateResponse::Years(YearsResponse {
                    years: aggregate_by_year_with(movies, scope),
                })
            }
            AggregateRequest::StudiosWithWinCount => AggregateResponse::Studios(StudiosResponse {
                studios: aggregate_by_studio(movies),
            }),
            AggregateRequest::MaxMinWinIntervalForProducers => {
                AggregateResponse::IntervalWin(analyze_intervals(movies))
            }
        }
    }
}

/// Response of `years-with-multiple-winners`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearsResponse {
    pub years: Vec<YearWinnerCount>,
}

/// Response of `studios-with-win-count`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudiosResponse {
    pub studios: Vec<StudioWinCount>,
}

/// Response of any aggregation, serialized without a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AggregateResponse {
    Years(YearsResponse),
    Studios(StudiosResponse),
    IntervalWin(IntervalWinResult),
}

impl AggregateResponse {
    pub fn into_years(self) -> Result<YearsResponse, QueryError> {
        match self {
            AggregateResponse::Years(years) => Ok(years),
            _ => Err(QueryError::UnexpectedShape { expected: "years" }),
        }
    }

    pub fn into_studios(self) -> Result<StudiosResponse, QueryError> {
        match self {
            AggregateResponse::Studios(studios) => Ok(studios),
            _ => Err(QueryError::UnexpectedShape { expected: "studios" }),
        }
    }

    pub fn into_interval_win(self) -> Result<IntervalWinResult, QueryError> {
        match self {
            AggregateResponse::IntervalWin(intervals) => Ok(intervals),
            _ => Err(QueryError::UnexpectedShape {
                expected: "interval win",
            }),
        }
    }
}
