use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::{DataFormat, MovieCatalog, Year};
use pipeline::{
    top_studios, CreditScope, IntervalWinResult, MoviePage, MovieQuery, MovieView,
    StudioWinCount, YearWinnerCount,
};
use serde::Serialize;
use server::{
    AggregateResponse, Dashboard, FileSource, OrchestratorConfig, Projection, QueryOrchestrator,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// Award Stats - aggregation engine for movie-award records
#[derive(Parser)]
#[command(name = "award-stats")]
#[command(about = "Aggregations and listings over a movie-award list", long_about = None)]
struct Cli {
    /// Path to the movie list (CSV or JSON)
    #[arg(short, long, default_value = "data/movielist.csv")]
    data: PathBuf,

    /// Input format; detected from the file extension when omitted
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Simulated latency before every fetch, in milliseconds
    #[arg(long, default_value = "0")]
    latency_ms: u64,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for DataFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => DataFormat::Csv,
            FormatArg::Json => DataFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Producer credits per year
    Years {
        /// Count only the credits of winning movies
        #[arg(long)]
        winners_only: bool,
    },

    /// Win count per studio
    Studios {
        /// Show only the N studios with the most wins
        #[arg(long)]
        top: Option<usize>,
    },

    /// Producers with the shortest and longest gap between two wins
    Intervals,

    /// Run an aggregation by its projection name
    Aggregate {
        /// years-with-multiple-winners, studios-with-win-count or
        /// max-min-win-interval-for-producers
        #[arg(long)]
        projection: String,
    },

    /// List movies with optional filters and pagination
    Movies {
        /// Zero-based page number
        #[arg(long)]
        page: Option<usize>,

        /// Page size (default 10)
        #[arg(long)]
        size: Option<usize>,

        /// Filter on the winner flag (true or false)
        #[arg(long)]
        winner: Option<bool>,

        #[arg(long)]
        year: Option<Year>,

        /// Case-insensitive substring of the title
        #[arg(long)]
        title: Option<String>,

        /// Case-insensitive substring of the studios field
        #[arg(long)]
        studios: Option<String>,

        /// Case-insensitive substring of the producers field
        #[arg(long)]
        producers: Option<String>,
    },

    /// Movies of one year
    ByYear {
        #[arg(long)]
        year: Year,

        /// Winner flag to match
        #[arg(long, action = ArgAction::Set, default_value_t = true)]
        winner: bool,
    },

    /// All dashboard panels at once
    Dashboard,

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = OrchestratorConfig {
        data_path: cli.data.clone(),
        format: cli.format.map(DataFormat::from),
        latency: Duration::from_millis(cli.latency_ms),
    };
    let orchestrator = QueryOrchestrator::from_config(&config);
    info!("Serving queries from {:?}", config.data_path);
    let json = cli.json;

    match cli.command {
        Commands::Years { winners_only } => {
            let scope = if winners_only {
                CreditScope::WinnersOnly
            } else {
                CreditScope::AllCredits
            };
            let response = orchestrator.years_with_multiple_winners_in(scope).await?;
            if json {
                print_json(&response)?;
            } else {
                print_years(&response.years);
            }
        }
        Commands::Studios { top } => {
            let mut studios = orchestrator.studios_with_win_count().await?.studios;
            if let Some(n) = top {
                studios = top_studios(studios, n);
            }
            if json {
                print_json(&studios)?;
            } else {
                print_studios(&studios);
            }
        }
        Commands::Intervals => {
            let intervals = orchestrator.interval_win().await?;
            if json {
                print_json(&intervals)?;
            } else {
                print_intervals(&intervals);
            }
        }
        Commands::Aggregate { projection } => {
            let response = orchestrator
                .aggregate_projection(&projection)
                .await
                .with_context(|| format!("Failed to run projection '{}'", projection))?;
            if json {
                print_json(&response)?;
            } else {
                match &response {
                    AggregateResponse::Years(years) => print_years(&years.years),
                    AggregateResponse::Studios(studios) => print_studios(&studios.studios),
                    AggregateResponse::IntervalWin(intervals) => print_intervals(intervals),
                }
            }
        }
        Commands::Movies {
            page,
            size,
            winner,
            year,
            title,
            studios,
            producers,
        } => {
            let query = MovieQuery {
                page,
                size,
                winner,
                year,
                title,
                studios,
                producers,
            };
            let page = orchestrator.movies(query).await?;
            if json {
                print_json(&page)?;
            } else {
                print_page(&page);
            }
        }
        Commands::ByYear { year, winner } => {
            let movies = orchestrator.movies_by_year(year, winner).await?;
            if json {
                print_json(&movies)?;
            } else {
                println!("{}", format!("Movies of {} (winner: {}):", year, winner).bold().blue());
                print_movies(&movies);
            }
        }
        Commands::Dashboard => {
            let dashboard = Dashboard::load(&orchestrator).await;
            if json {
                print_json(&dashboard)?;
            } else {
                print_years(&dashboard.years.data);
                println!();
                print_studios(&dashboard.top_studios.data);
                println!();
                print_intervals(&dashboard.intervals.data);
            }
        }
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(&config, orchestrator, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    config: &OrchestratorConfig,
    orchestrator: QueryOrchestrator<FileSource>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 {
        bail!("Benchmark needs at least one request");
    }

    // Validate the data up front so a broken file fails once, not per request
    let start = Instant::now();
    let format = config
        .format
        .unwrap_or_else(|| DataFormat::from_path(&config.data_path));
    let catalog = MovieCatalog::load_from_file_as(&config.data_path, format)
        .context("Failed to load movie list")?;
    let (movies, winners, years) = catalog.counts();
    println!(
        "{} Loaded {} movies ({} winners, {} years) in {:?}",
        "✓".green(),
        movies,
        winners,
        years,
        start.elapsed()
    );

    let semaphore = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();
    info!("Benchmark: {} requests, {} concurrent", requests, concurrent);

    // Random projection per request, all through one orchestrator
    let mut handles = vec![];
    for _ in 0..requests {
        let projection = Projection::ALL[rand::random_range(0..Projection::ALL.len())];
        let orchestrator = orchestrator.clone();
        let semaphore = semaphore.clone();
        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let start = Instant::now();
            orchestrator.aggregate(projection.into()).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        }));
    }

    let mut timings = vec![];
    for handle in handles {
        timings.push(handle.await??);
    }
    let wall_time = wall_clock.elapsed();
    info!("Benchmark finished in {:?}", wall_time);

    let total_latency: Duration = timings.iter().sum();
    let avg_latency = total_latency / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f32 / wall_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);
    println!("Cached responses: {}", orchestrator.cached_entries());

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

fn print_years(years: &[YearWinnerCount]) {
    println!("{}", "Producer credits per year:".bold().blue());
    for entry in years {
        println!("  {} {}", entry.year.to_string().green(), entry.winner_count);
    }
}

fn print_studios(studios: &[StudioWinCount]) {
    println!("{}", "Studios by win count:".bold().blue());
    for (rank, studio) in studios.iter().enumerate() {
        println!("{}. {} ({})", (rank + 1).to_string().green(), studio.name, studio.win_count);
    }
}

fn print_intervals(intervals: &IntervalWinResult) {
    println!("{}", "Win intervals:".bold().blue());
    for (label, entries) in [("min", &intervals.min), ("max", &intervals.max)] {
        for entry in entries {
            println!(
                "{}{} {}: {} years ({} -> {})",
                "• ".cyan(),
                label,
                entry.producer,
                entry.interval,
                entry.previous_win,
                entry.following_win
            );
        }
    }
    if intervals.min.is_empty() {
        println!("  No producer has won twice");
    }
}

fn print_page(page: &MoviePage) {
    println!(
        "{}",
        format!(
            "Page {} of {} ({} movies):",
            page.number + 1,
            page.total_pages.max(1),
            page.total_elements
        )
        .bold()
        .blue()
    );
    print_movies(&page.content);
}

fn print_movies(movies: &[MovieView]) {
    for movie in movies {
        let marker = if movie.winner { "★".yellow() } else { " ".normal() };
        println!(
            "{} {} {} ({}) [{}]",
            marker,
            movie.id.to_string().green(),
            movie.title,
            movie.year,
            movie.studios.join(", ")
        );
    }
}
