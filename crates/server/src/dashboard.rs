//! Dashboard and listing view models.
//!
//! These types hold what a front end renders: each panel carries a loading
//! flag next to its data, and a failed query leaves the panel with its
//! default data instead of an error.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use data_loader::Year;
use pipeline::{
    top_studios, IntervalWinResult, MoviePage, MovieQuery, MovieView, StudioWinCount,
    YearWinnerCount, DEFAULT_PAGE_SIZE,
};

use crate::debounce::Debouncer;
use crate::error::Result;
use crate::orchestrator::QueryOrchestrator;
use crate::source::MovieSource;

/// Number of studios shown on the dashboard
pub const TOP_STUDIOS: usize = 3;

/// Quiet period before a typed year is searched
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(1000);

/// One dashboard panel
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Panel<T> {
    pub loading: bool,
    pub data: T,
}

impl<T: Default> Panel<T> {
    /// A panel whose query has not answered yet
    pub fn pending() -> Self {
        Panel {
            loading: true,
            data: T::default(),
        }
    }

    /// Await `query`, falling back to the default data when it fails
    pub async fn load<F>(name: &str, query: F) -> Self
    where
        F: Future<Output = Result<T>>,
    {
        match query.await {
            Ok(data) => Panel {
                loading: false,
                data,
            },
            Err(e) => {
                warn!("{} panel failed to load: {}", name, e);
                Panel {
                    loading: false,
                    data: T::default(),
                }
            }
        }
    }
}

/// The three aggregate panels of the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub years: Panel<Vec<YearWinnerCount>>,
    pub top_studios: Panel<Vec<StudioWinCount>>,
    pub intervals: Panel<IntervalWinResult>,
}

async fn years_panel<S: MovieSource>(orchestrator: &QueryOrchestrator<S>) -> Panel<Vec<YearWinnerCount>> {
    Panel::load("years", async {
        orchestrator
            .years_with_multiple_winners()
            .await
            .map(|response| response.years)
    })
    .await
}

async fn studios_panel<S: MovieSource>(orchestrator: &QueryOrchestrator<S>) -> Panel<Vec<StudioWinCount>> {
    Panel::load("studios", async {
        orchestrator
            .studios_with_win_count()
            .await
            .map(|response| top_studios(response.studios, TOP_STUDIOS))
    })
    .await
}

async fn intervals_panel<S: MovieSource>(orchestrator: &QueryOrchestrator<S>) -> Panel<IntervalWinResult> {
    Panel::load("intervals", orchestrator.interval_win()).await
}

impl Dashboard {
    /// Every panel still waiting for its query
    pub fn pending() -> Self {
        Dashboard {
            years: Panel::pending(),
            top_studios: Panel::pending(),
            intervals: Panel::pending(),
        }
    }

    /// True while any panel is waiting
    pub fn is_loading(&self) -> bool {
        self.years.loading || self.top_studios.loading || self.intervals.loading
    }

    /// Load every panel concurrently
    #[instrument(skip_all)]
    pub async fn load<S: MovieSource>(orchestrator: &QueryOrchestrator<S>) -> Self {
        let (years, top_studios, intervals) = tokio::join!(
            years_panel(orchestrator),
            studios_panel(orchestrator),
            intervals_panel(orchestrator),
        );

        let dashboard = Dashboard {
            years,
            top_studios,
            intervals,
        };
        dashboard.log_loaded();
        dashboard
    }

    /// Load the panels in a background task, publishing each one as it
    /// answers.
    ///
    /// The receiver starts at [`Dashboard::pending`]; every panel flips its
    /// own loading flag when its query settles.
    pub fn spawn<S: MovieSource>(orchestrator: QueryOrchestrator<S>) -> watch::Receiver<Dashboard> {
        let (publisher, dashboard) = watch::channel(Dashboard::pending());

        tokio::spawn(async move {
            tokio::join!(
                async {
                    let panel = years_panel(&orchestrator).await;
                    publisher.send_modify(|d| d.years = panel);
                },
                async {
                    let panel = studios_panel(&orchestrator).await;
                    publisher.send_modify(|d| d.top_studios = panel);
                },
                async {
                    let panel = intervals_panel(&orchestrator).await;
                    publisher.send_modify(|d| d.intervals = panel);
                },
            );
            publisher.borrow().log_loaded();
        });

        dashboard
    }

    fn log_loaded(&self) {
        info!(
            "Dashboard loaded: {} years, {} studios, {} min / {} max intervals",
            self.years.data.len(),
            self.top_studios.data.len(),
            self.intervals.data.min.len(),
            self.intervals.data.max.len()
        );
    }
}

/// Paginated movie list with winner and year filters
#[derive(Debug, Clone, PartialEq)]
pub struct MoviesTable {
    /// Only winners are listed when set; clearing it lists every movie
    pub filter_winner: bool,
    pub filter_year: Option<Year>,
    pub current_page: usize,
    pub page_size: usize,
    pub page: Option<MoviePage>,
    pub total_pages: usize,
    /// Page numbers offered for navigation
    pub pages: Vec<usize>,
}

impl Default for MoviesTable {
    fn default() -> Self {
        Self {
            filter_winner: true,
            filter_year: None,
            current_page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            page: None,
            total_pages: 1,
            pages: Vec::new(),
        }
    }
}

impl MoviesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listing query for the current filters and page
    pub fn query(&self) -> MovieQuery {
        MovieQuery {
            page: Some(self.current_page),
            size: Some(self.page_size),
            winner: self.filter_winner.then_some(true),
            year: self.filter_year.filter(|year| *year != 0),
            ..Default::default()
        }
    }

    /// Re-run the listing query
    pub async fn refresh<S: MovieSource>(&mut self, orchestrator: &QueryOrchestrator<S>) {
        match orchestrator.movies(self.query()).await {
            Ok(page) => {
                self.total_pages = page.total_pages;
                self.pages = (0..page.total_pages).collect();
                self.page = Some(page);
            }
            Err(e) => {
                warn!("Movie listing failed to load: {}", e);
                self.page = None;
                self.total_pages = 1;
                self.pages = Vec::new();
            }
        }
    }

    /// Back to the first page at the default size
    pub async fn reset_pagination<S: MovieSource>(&mut self, orchestrator: &QueryOrchestrator<S>) {
        self.page_size = DEFAULT_PAGE_SIZE;
        self.current_page = 0;
        self.refresh(orchestrator).await;
    }

    pub async fn go_to_page<S: MovieSource>(&mut self, page: usize, orchestrator: &QueryOrchestrator<S>) {
        self.current_page = page;
        self.refresh(orchestrator).await;
    }

    pub async fn set_page_size<S: MovieSource>(&mut self, size: usize, orchestrator: &QueryOrchestrator<S>) {
        self.page_size = size;
        self.current_page = 0;
        self.refresh(orchestrator).await;
    }

    /// Change the winner filter; pagination resets only on an actual change
    pub async fn set_winner<S: MovieSource>(&mut self, winner: bool, orchestrator: &QueryOrchestrator<S>) {
        if self.filter_winner != winner {
            self.filter_winner = winner;
            self.reset_pagination(orchestrator).await;
        }
    }

    /// Change the year filter; pagination resets only on an actual change
    pub async fn set_year<S: MovieSource>(&mut self, year: Option<Year>, orchestrator: &QueryOrchestrator<S>) {
        if self.filter_year != year {
            self.filter_year = year;
            self.reset_pagination(orchestrator).await;
        }
    }
}

/// State of the winners-by-year search panel
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct YearSearchState {
    pub loading: bool,
    pub year: Option<Year>,
    pub movies: Vec<MovieView>,
}

/// Debounced search for the winners of one year
pub struct MoviesByYearSearch {
    debouncer: Debouncer<String>,
    state: watch::Receiver<YearSearchState>,
    task: JoinHandle<()>,
}

impl MoviesByYearSearch {
    /// Start the search task with the standard quiet period
    pub fn spawn<S: MovieSource>(orchestrator: QueryOrchestrator<S>) -> Self {
        Self::with_quiet_period(orchestrator, SEARCH_DEBOUNCE)
    }

    pub fn with_quiet_period<S: MovieSource>(orchestrator: QueryOrchestrator<S>, quiet: Duration) -> Self {
        let (debouncer, mut inputs) = Debouncer::<String>::new(quiet);
        let (publisher, state) = watch::channel(YearSearchState::default());

        let task = tokio::spawn(async move {
            while let Some(input) = inputs.recv().await {
                let input = input.trim();
                if input.is_empty() {
                    continue;
                }
                let Ok(year) = input.parse::<Year>() else {
                    debug!("Ignoring non-numeric year search {:?}", input);
                    continue;
                };

                publisher.send_modify(|state| {
                    state.loading = true;
                    state.year = Some(year);
                });
                let movies = match orchestrator.movies_by_year(year, true).await {
                    Ok(movies) => movies,
                    Err(e) => {
                        warn!("Search for {} failed: {}", year, e);
                        Vec::new()
                    }
                };
                debug!("Year {} has {} winners", year, movies.len());
                publisher.send_replace(YearSearchState {
                    loading: false,
                    year: Some(year),
                    movies,
                });
            }
        });

        Self {
            debouncer,
            state,
            task,
        }
    }

    /// Feed the raw text of the year field
    pub fn input(&self, text: impl Into<String>) {
        self.debouncer.push(text.into());
    }

    /// Snapshot of the current state
    pub fn state(&self) -> YearSearchState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<YearSearchState> {
        self.state.clone()
    }
}

impl Drop for MoviesByYearSearch {
    fn drop(&mut self) {
        self.task.abort();
    }
}
