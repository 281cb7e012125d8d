use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{MovieIndex, RecommendationIndex};
use server::{Config, MovieRecommendation, RecommendationOrchestrator};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// ReelRecs - Movie Recommendation Engine
#[derive(Parser)]
#[command(name = "reel-recs")]
#[command(about = "Content-based movie recommendations using TF-IDF similarity", long_about = None)]
struct Cli {
    /// Path to the movie dataset CSV (overrides DATASET_PATH)
    #[arg(short, long, global = true)]
    dataset: Option<PathBuf>,

    /// Vocabulary size cap (overrides MAX_FEATURES)
    #[arg(long, global = true)]
    max_features: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Address to bind (overrides HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Get movie recommendations for a list of favorites
    Recommend {
        /// Favorite movie title, repeat for several
        #[arg(long = "favorite", required = true)]
        favorites: Vec<String>,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        limit: usize,

        /// Show which terms each recommendation shares with the favorites
        #[arg(long)]
        explain: bool,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// List catalog entries
    Movies {
        /// Number of movies to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

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

    let mut config = Config::from_env()?;
    if let Some(dataset) = cli.dataset {
        config.dataset_path = dataset;
    }
    if let Some(max_features) = cli.max_features {
        config.max_features = max_features;
    }

    // Load the dataset and fit the vectorizer
    println!("Loading movie dataset from {}...", config.dataset_path.display());
    let start = Instant::now();
    let orchestrator = server::load_orchestrator(&config)?;
    let (movies, features) = orchestrator.index().counts();
    println!(
        "{} Loaded {} movies ({} features) in {:?}",
        "✓".green(),
        movies,
        features,
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            info!("Serving on {}", config.bind_addr());
            server::serve(&config, orchestrator).await?
        }
        Commands::Recommend {
            favorites,
            limit,
            explain,
        } => handle_recommend(orchestrator, favorites, limit, explain).await?,
        Commands::Search { title } => handle_search(orchestrator.index(), &title),
        Commands::Movies { limit } => handle_movies(orchestrator.index(), limit),
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(orchestrator, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    orchestrator: RecommendationOrchestrator,
    favorites: Vec<String>,
    limit: usize,
    explain: bool,
) -> Result<()> {
    for title in &favorites {
        if orchestrator.index().find_by_title(title).is_none() {
            println!("{} '{}' is not in the catalog, ignoring", "!".yellow(), title);
        }
    }

    let recommendations = orchestrator
        .get_recommendations(favorites, Some(limit))
        .await?;

    if recommendations.is_empty() {
        println!(
            "{}",
            "No recommendations found. Please check your movie selections.".red()
        );
        return Ok(());
    }

    print_recommendations(&recommendations, explain);
    Ok(())
}

/// Handle the 'search' command
fn handle_search(index: &RecommendationIndex, title: &str) {
    let needle = title.to_lowercase();

    // (position, exact match, rating)
    let mut matches: Vec<(MovieIndex, bool, f32)> = index
        .catalog()
        .iter()
        .enumerate()
        .filter_map(|(position, movie)| {
            let haystack = movie.title.to_lowercase();
            if haystack == needle {
                Some((position, true, movie.rating_or_zero()))
            } else if haystack.contains(&needle) {
                Some((position, false, movie.rating_or_zero()))
            } else {
                None
            }
        })
        .collect();

    // Exact matches first, then by rating
    matches.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal))
    });

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  no matches");
        return;
    }
    for &(position, _, _) in matches.iter().take(20) {
        if let Some(movie) = index.get_movie(position) {
            println!(
                "{}: {} [{}] rating {}",
                position,
                movie.title,
                movie.genres,
                format_rating(movie.rating)
            );
        }
    }
}

/// Handle the 'movies' command
fn handle_movies(index: &RecommendationIndex, limit: usize) {
    println!(
        "{}",
        format!("Catalog ({} movies):", index.catalog().len()).bold().blue()
    );
    for movie in index.catalog().iter().take(limit) {
        println!(
            "{}{} [{}] rating {}",
            "• ".green(),
            movie.title,
            movie.genres,
            format_rating(movie.rating)
        );
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    orchestrator: RecommendationOrchestrator,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    check_benchmark_args(requests, concurrent)?;

    // Random favorites lists of 1-3 titles drawn from the catalog
    let movies = orchestrator.index().catalog().len();
    let requests_favorites: Vec<Vec<String>> = (0..requests)
        .map(|_| {
            let count = rand::random_range(1..=3);
            (0..count)
                .filter_map(|_| {
                    orchestrator
                        .index()
                        .get_movie(rand::random_range(0..movies))
                        .map(|movie| movie.title.clone())
                })
                .collect()
        })
        .collect();

    let semaphore = Arc::new(Semaphore::new(concurrent));
    let wall_clock = Instant::now();

    let mut handles = vec![];
    for favorites in requests_favorites {
        let orchestrator = orchestrator.clone();
        let semaphore = semaphore.clone();
        let handle = tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let start = Instant::now();
            orchestrator.get_recommendations(favorites, None).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let total_time = wall_clock.elapsed();

    timings.sort();
    let sum: Duration = timings.iter().sum();
    let avg_latency = sum / timings.len() as u32;
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent);
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(&timings, 0.50));
    println!("P95 latency: {:?}", percentile(&timings, 0.95));
    println!("P99 latency: {:?}", percentile(&timings, 0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// `Semaphore::new` panics above `MAX_PERMITS`, so bound `--concurrent` here
fn check_benchmark_args(requests: usize, concurrent: usize) -> Result<()> {
    if requests == 0 || concurrent == 0 {
        bail!("--requests and --concurrent must be greater than zero");
    }
    if concurrent > Semaphore::MAX_PERMITS {
        bail!(
            "--concurrent must be at most {} (got {})",
            Semaphore::MAX_PERMITS,
            concurrent
        );
    }
    Ok(())
}

/// Nearest-rank percentile of sorted, non-empty timings
fn percentile(sorted: &[Duration], p: f64) -> Duration {
    let rank = (sorted.len() as f64 * p) as usize;
    sorted[rank.min(sorted.len() - 1)]
}

fn format_rating(rating: Option<f32>) -> String {
    rating.map_or_else(|| "n/a".to_string(), |r| format!("{:.1}", r))
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[MovieRecommendation], explain: bool) {
    print!("{}", "Movie Recommendations:\n".bold().blue());
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} [{}] - Rating: {:.1} - Similarity: {:.3}",
            (i + 1).to_string().green(),
            rec.title,
            rec.genres,
            rec.rating,
            rec.similarity_score
        );
        if explain {
            println!("   Keywords: {}", rec.keywords);
            println!("   {}", rec.explanation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benchmark_args_bounds() {
        assert!(check_benchmark_args(100, 10).is_ok());
        assert!(check_benchmark_args(1, Semaphore::MAX_PERMITS).is_ok());

        assert!(check_benchmark_args(0, 10).is_err());
        assert!(check_benchmark_args(100, 0).is_err());

        let err = check_benchmark_args(100, Semaphore::MAX_PERMITS + 1).unwrap_err();
        assert!(err.to_string().contains("--concurrent must be at most"));
    }

    #[test]
    fn test_percentile_nearest_rank() {
        let timings: Vec<Duration> = (1..=10).map(Duration::from_millis).collect();

        assert_eq!(percentile(&timings, 0.5), Duration::from_millis(6));
        assert_eq!(percentile(&timings, 0.99), Duration::from_millis(10));
        assert_eq!(percentile(&timings[..1], 0.95), Duration::from_millis(1));
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(Some(7.9)), "7.9");
        assert_eq!(format_rating(None), "n/a");
    }
}
