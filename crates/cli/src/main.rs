use anyhow::{anyhow, Context, Result};
use catalog::{CatalogIndex, Tour, TourId, UserId};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pipeline::TourRecommendation;
use server::{EngineConfig, RecommendationService};
use sources::{PreferenceProfile, WeightTable};
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// TourRecs - Tour Recommendation Engine
#[derive(Parser)]
#[command(name = "tour-recs")]
#[command(about = "Tour recommendations from booking, favorite and review history", long_about = None)]
struct Cli {
    /// Directory holding tours.json, bookings.json, favorites.json, reviews.json
    #[arg(short, long, default_value = "data/sample")]
    data_dir: PathBuf,

    /// Engine configuration file (TOML); defaults to ./tour-recs.toml if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, overrides RUST_LOG (e.g. "debug" or "server=debug")
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get tour recommendations for a user (popular tours without one)
    Recommend {
        /// User ID to get recommendations for
        #[arg(long)]
        user_id: Option<UserId>,

        /// Number of recommendations to return
        #[arg(long)]
        limit: Option<usize>,

        /// Show the score breakdown for each recommendation
        #[arg(long)]
        explain: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List popular tours
    Popular {
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// List tours similar to a given tour
    Similar {
        #[arg(long)]
        tour_id: TourId,

        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// Show the preference profile built for a user
    Profile {
        #[arg(long)]
        user_id: UserId,

        #[arg(long)]
        json: bool,
    },

    /// Search for tours by name
    Search {
        /// Tour name to search for (case-insensitive substring match)
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Maximum number of requests in flight
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match &cli.log_level {
        Some(level) => EnvFilter::try_new(level).context("Invalid --log-level filter")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = EngineConfig::load(cli.config.as_deref()).context("Failed to load engine config")?;
    debug!("Engine config: {:?}", config);

    info!("Loading catalog from {}", cli.data_dir.display());
    let start = Instant::now();
    let index = Arc::new(
        CatalogIndex::load_from_dir(&cli.data_dir).context("Failed to load tour catalog")?,
    );
    let (tours, bookings, favorites, reviews) = index.counts();
    info!(
        "Loaded {} tours, {} bookings, {} favorites, {} reviews in {:?}",
        tours,
        bookings,
        favorites,
        reviews,
        start.elapsed()
    );

    let service = RecommendationService::with_config(index.clone(), index.clone(), config);

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            user_id,
            limit,
            explain,
            json,
        } => handle_recommend(&service, user_id, limit, explain, json).await?,
        Commands::Popular { limit, json } => handle_popular(&service, limit, json).await?,
        Commands::Similar {
            tour_id,
            limit,
            json,
        } => handle_similar(&service, tour_id, limit, json).await?,
        Commands::Profile { user_id, json } => handle_profile(&service, user_id, json).await?,
        Commands::Search { name, limit } => handle_search(&index, &name, limit),
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(service, &index, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    service: &RecommendationService,
    user_id: Option<UserId>,
    limit: Option<usize>,
    explain: bool,
    json: bool,
) -> Result<()> {
    let recommendations = service
        .get_personalized_recommendations(user_id.as_ref(), limit)
        .await
        .context("Failed to get recommendations")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
        return Ok(());
    }

    let header = match &user_id {
        Some(user_id) => format!("Recommendations for user {}:", user_id),
        None => "Recommendations (anonymous):".to_string(),
    };
    println!("{}", header.bold().blue());
    print_recommendations(&recommendations, explain);
    Ok(())
}

/// Handle the 'popular' command
async fn handle_popular(
    service: &RecommendationService,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let tours = service
        .get_popular_tours(limit)
        .await
        .context("Failed to get popular tours")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tours)?);
    } else {
        println!("{}", "Popular tours:".bold().blue());
        print_tours(&tours);
    }
    Ok(())
}

/// Handle the 'similar' command
async fn handle_similar(
    service: &RecommendationService,
    tour_id: TourId,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let tours = service
        .get_similar_tours(&tour_id, limit)
        .await
        .with_context(|| format!("Failed to get tours similar to {}", tour_id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tours)?);
    } else {
        println!("{}", format!("Tours similar to {}:", tour_id).bold().blue());
        print_tours(&tours);
    }
    Ok(())
}

/// Handle the 'profile' command
async fn handle_profile(service: &RecommendationService, user_id: UserId, json: bool) -> Result<()> {
    let profile = service
        .build_profile(&user_id)
        .await
        .context("Failed to build preference profile")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    print_profile(&user_id, &profile);
    Ok(())
}

/// Handle the 'search' command
fn handle_search(index: &CatalogIndex, name: &str, limit: usize) {
    let matches = index.search_by_name(name);

    println!("{}", format!("Search results for '{}':", name).bold().blue());
    if matches.is_empty() {
        println!("  (no matches)");
        return;
    }
    for tour in matches.into_iter().take(limit) {
        println!(
            "{}: {} [{} / {}] ${:.2} avg {:.1} ({} ratings)",
            tour.id,
            tour.name,
            tour.tour_type,
            tour.difficulty,
            tour.price,
            tour.ratings_average,
            tour.ratings_quantity
        );
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    service: RecommendationService,
    index: &CatalogIndex,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 {
        return Err(anyhow!("--requests must be greater than zero"));
    }
    let users = index.user_ids();
    let semaphore = Arc::new(Semaphore::new(concurrent.max(1)));

    // Random known users; anonymous requests if the catalog has none
    let user_ids: Vec<Option<UserId>> = (0..requests)
        .map(|_| {
            if users.is_empty() {
                None
            } else {
                let i = rand::random::<u32>() as usize % users.len();
                Some(users[i].clone())
            }
        })
        .collect();

    let wall_clock = Instant::now();
    let mut handles = vec![];
    for user in user_ids {
        let service = service.clone();
        let semaphore = semaphore.clone();
        let handle = tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let start = Instant::now();
            service.get_personalized_recommendations(user.as_ref(), None).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings: Vec<Duration> = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let total_time = wall_clock.elapsed();

    let latency_sum: Duration = timings.iter().sum();
    let avg_latency = latency_sum / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent.max(1));
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Print recommendations, with score terms if `explain` is set
fn print_recommendations(recommendations: &[TourRecommendation], explain: bool) {
    if recommendations.is_empty() {
        println!("  (no tours)");
        return;
    }
    for (rank, rec) in recommendations.iter().enumerate() {
        let score = rec
            .relevance_score
            .map(|s| format!("Score: {:.2}", s))
            .unwrap_or_else(|| "unscored".to_string());
        println!(
            "{}. {} [{} / {}] ${:.2} - {} ({})",
            (rank + 1).to_string().green(),
            rec.tour.name,
            rec.tour.tour_type,
            rec.tour.difficulty,
            rec.tour.price,
            score,
            rec.source
        );
        if explain {
            if let Some(b) = &rec.breakdown {
                println!(
                    "   type {:.1} + difficulty {:.1} + duration {:.1} + price {:.2} + rating {:.1}",
                    b.tour_type, b.difficulty, b.duration, b.price, b.rating
                );
            } else {
                println!("   {}", "popular fallback, no personal signal".dimmed());
            }
        }
    }
}

fn print_tours(tours: &[Tour]) {
    if tours.is_empty() {
        println!("  (no tours)");
        return;
    }
    for (rank, tour) in tours.iter().enumerate() {
        println!(
            "{}. {} ({}) [{} / {}] ${:.2} avg {:.1} ({} ratings)",
            (rank + 1).to_string().green(),
            tour.name,
            tour.id,
            tour.tour_type,
            tour.difficulty,
            tour.price,
            tour.ratings_average,
            tour.ratings_quantity
        );
    }
}

fn print_profile(user_id: &str, profile: &PreferenceProfile) {
    println!("{}", format!("Preference profile for user {}", user_id).bold().blue());
    if profile.is_empty() {
        println!("  (no usable history)");
    }
    print_table("Tour types", &profile.tour_types);
    print_table("Difficulties", &profile.difficulties);
    print_table("Durations", &profile.durations);
    print_table("Locations", &profile.locations);
    println!(
        "{}Price: ${:.0} preferred (${:.2} - ${:.2})",
        "• ".cyan(),
        profile.price_range.preferred,
        profile.price_range.min,
        profile.price_range.max
    );
    println!("{}Average rating given: {:.2}", "• ".cyan(), profile.average_rating);
    println!("{}Total interaction weight: {}", "• ".cyan(), profile.total_interactions);
}

fn print_table<K: Display + PartialEq>(label: &str, table: &WeightTable<K>) {
    let entries = table
        .iter()
        .map(|(key, weight)| format!("{}: {}", key, weight))
        .collect::<Vec<_>>()
        .join(", ");
    println!("{}{}: {}", "• ".green(), label, if entries.is_empty() { "-" } else { entries.as_str() });
}
