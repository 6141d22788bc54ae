//! Test harness for the query orchestrator.
//!
//! Loads the data file named by `AWARD_DATA` (default `data/movielist.csv`),
//! renders the dashboard and the first page of winners through the log.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::{Dashboard, MoviesTable, OrchestratorConfig, QueryOrchestrator};

const DEFAULT_DATA_PATH: &str = "data/movielist.csv";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug,pipeline=debug")),
        )
        .init();

    info!("Starting award-stats server test harness");

    let mut config = OrchestratorConfig::new(
        std::env::var("AWARD_DATA").unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string()),
    );
    if let Ok(latency) = std::env::var("AWARD_LATENCY_MS") {
        let millis: u64 = latency
            .parse()
            .with_context(|| format!("AWARD_LATENCY_MS must be a number, got {:?}", latency))?;
        config.latency = Duration::from_millis(millis);
    }
    info!("Reading movies from {}", config.data_path.display());

    let orchestrator = QueryOrchestrator::from_config(&config);

    let mut updates = Dashboard::spawn(orchestrator.clone());
    let dashboard = loop {
        let snapshot = updates.borrow_and_update().clone();
        if !snapshot.is_loading() {
            break snapshot;
        }
        let pending = [
            snapshot.years.loading,
            snapshot.top_studios.loading,
            snapshot.intervals.loading,
        ];
        info!("Dashboard: {} of 3 panels still loading", pending.iter().filter(|p| **p).count());
        updates
            .changed()
            .await
            .context("Dashboard task stopped before every panel loaded")?;
    };
    for entry in &dashboard.years.data {
        info!("{}: {} producer credits", entry.year, entry.winner_count);
    }
    for studio in &dashboard.top_studios.data {
        info!("{}: {} wins", studio.name, studio.win_count);
    }
    for interval in &dashboard.intervals.data.min {
        info!(
            "Shortest: {} ({} -> {}, {} years)",
            interval.producer, interval.previous_win, interval.following_win, interval.interval
        );
    }
    for interval in &dashboard.intervals.data.max {
        info!(
            "Longest: {} ({} -> {}, {} years)",
            interval.producer, interval.previous_win, interval.following_win, interval.interval
        );
    }

    let mut table = MoviesTable::new();
    table.refresh(&orchestrator).await;
    match &table.page {
        Some(page) => {
            info!("Winners page 1 of {}:", table.total_pages);
            for movie in &page.content {
                info!("   {} ({}) [{}]", movie.title, movie.year, movie.studios.join(", "));
            }
        }
        None => info!("No winners page available"),
    }

    info!("{} responses cached", orchestrator.cached_entries());
    Ok(())
}
