use anyhow::{Context, Result, bail};
use catalog::CatalogIndex;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use futures::stream::{self, StreamExt};
use matching::SharedTitleRecord;
use resolver::{ActorDetails, ResolverConfig, RetryPolicy, SharedFilmography, SharedFilmographyResolver};
use sources::{CachedSource, CatalogSource, FilmographySource, TmdbSource};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tmdb_client::TmdbClient;

/// costars - find the titles two actors appeared in together
#[derive(Parser)]
#[command(name = "costars")]
#[command(about = "Shared filmography of two actors", long_about = None)]
struct Cli {
    /// Where filmography data comes from
    #[arg(long, value_enum, default_value = "catalog", global = true)]
    source: SourceKind,

    /// Path to the offline catalog (actors.dat, credits.dat)
    #[arg(short, long, default_value = "data/catalog", global = true)]
    data_dir: PathBuf,

    /// TMDB API key (v3), required with --source tmdb
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true, global = true)]
    tmdb_api_key: Option<String>,

    /// Override the TMDB API root
    #[arg(long, env = "TMDB_BASE_URL", global = true)]
    tmdb_base_url: Option<String>,

    /// Overall deadline per request in milliseconds
    #[arg(long, default_value = "5000", global = true)]
    deadline_ms: u64,

    /// Attempts per upstream call, including the first
    #[arg(long, default_value = "3", global = true)]
    attempts: u32,

    /// How long TMDB responses are cached
    #[arg(long, default_value = "3600", global = true)]
    cache_ttl_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SourceKind {
    /// Offline catalog files
    Catalog,
    /// The Movie Database API
    Tmdb,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the titles two actors share
    Shared {
        /// First actor id
        #[arg(long)]
        first: String,

        /// Second actor id
        #[arg(long)]
        second: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show an actor's profile and filmography
    Actor {
        /// Actor id
        #[arg(long)]
        id: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve random catalog pairs and report latency
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
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ResolverConfig::default()
        .with_deadline(Duration::from_millis(cli.deadline_ms))
        .with_retry(RetryPolicy::default().with_max_attempts(cli.attempts));

    match cli.command {
        Commands::Shared {
            ref first,
            ref second,
            json,
        } => {
            let (source, _) = build_source(&cli)?;
            let resolver = SharedFilmographyResolver::new(source).with_config(config);
            handle_shared(&resolver, first, second, json).await?
        }
        Commands::Actor { ref id, json } => {
            let (source, _) = build_source(&cli)?;
            let resolver = SharedFilmographyResolver::new(source).with_config(config);
            handle_actor(&resolver, id, json).await?
        }
        Commands::Benchmark {
            requests,
            concurrent,
        } => {
            let (source, catalog) = build_source(&cli)?;
            let Some(catalog) = catalog else {
                bail!("benchmark draws actor pairs from the catalog; use --source catalog");
            };
            let resolver = Arc::new(SharedFilmographyResolver::new(source).with_config(config));
            handle_benchmark(resolver, &catalog, requests, concurrent).await?
        }
    }

    Ok(())
}

/// Build the configured source. The loaded catalog is returned as well so
/// the benchmark can draw actor ids from it.
fn build_source(cli: &Cli) -> Result<(Arc<dyn FilmographySource>, Option<Arc<CatalogIndex>>)> {
    match cli.source {
        SourceKind::Catalog => {
            eprintln!("Loading catalog from {}...", cli.data_dir.display());
            let start = Instant::now();
            let index = Arc::new(
                CatalogIndex::load_from_dir(&cli.data_dir).context("Failed to load filmography catalog")?,
            );
            let (actors, credits) = index.counts();
            eprintln!(
                "{} Loaded {} actors and {} credits in {:?}",
                "✓".green(),
                actors,
                credits,
                start.elapsed()
            );
            Ok((Arc::new(CatalogSource::new(index.clone())), Some(index)))
        }
        SourceKind::Tmdb => {
            let Some(api_key) = cli.tmdb_api_key.as_deref() else {
                bail!("--source tmdb needs an API key (--tmdb-api-key or TMDB_API_KEY)");
            };
            let mut client = TmdbClient::new(api_key).context("Failed to build TMDB client")?;
            if let Some(base_url) = &cli.tmdb_base_url {
                client = client.with_base_url(base_url);
            }
            let source = CachedSource::with_ttl(TmdbSource::new(client), Duration::from_secs(cli.cache_ttl_secs));
            Ok((Arc::new(source), None))
        }
    }
}

/// Handle the 'shared' command
async fn handle_shared(resolver: &SharedFilmographyResolver, first: &str, second: &str, json: bool) -> Result<()> {
    let shared = resolver
        .resolve(first, second)
        .await
        .with_context(|| format!("Failed to resolve shared filmography of {} and {}", first, second))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&shared)?);
    } else {
        print_shared(&shared);
    }
    Ok(())
}

/// Handle the 'actor' command
async fn handle_actor(resolver: &SharedFilmographyResolver, id: &str, json: bool) -> Result<()> {
    let details = resolver
        .actor_details(id)
        .await
        .with_context(|| format!("Failed to fetch actor {}", id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
    } else {
        print_actor(&details);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    resolver: Arc<SharedFilmographyResolver>,
    catalog: &CatalogIndex,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    let actor_ids: Vec<String> = catalog.actor_ids().into_iter().cloned().collect();
    if actor_ids.len() < 2 {
        bail!("benchmark needs at least two actors in the catalog");
    }

    // Random distinct pairs
    let pairs: Vec<(String, String)> = {
        let mut rng = rand::rng();
        (0..requests)
            .map(|_| {
                let picked = rand::seq::index::sample(&mut rng, actor_ids.len(), 2);
                (actor_ids[picked.index(0)].clone(), actor_ids[picked.index(1)].clone())
            })
            .collect()
    };

    println!(
        "Running {} requests with {} in flight...",
        requests,
        concurrent.max(1)
    );
    let wall = Instant::now();

    let results: Vec<(Duration, bool)> = stream::iter(pairs)
        .map(|(first, second)| {
            let resolver = resolver.clone();
            async move {
                let start = Instant::now();
                let ok = resolver.resolve(&first, &second).await.is_ok();
                (start.elapsed(), ok)
            }
        })
        .buffer_unordered(concurrent.max(1))
        .collect()
        .await;

    let total_time = wall.elapsed();
    let failures = results.iter().filter(|(_, ok)| !ok).count();
    let mut timings: Vec<Duration> = results.into_iter().map(|(elapsed, _)| elapsed).collect();
    if timings.is_empty() {
        println!("No requests made");
        return Ok(());
    }
    timings.sort();

    let percentile = |p: f64| timings[((timings.len() - 1) as f64 * p).round() as usize];
    let avg_latency = timings.iter().sum::<Duration>() / timings.len() as u32;
    let throughput = timings.len() as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);
    if failures > 0 {
        println!("{} {} requests failed", "!".yellow(), failures);
    }

    Ok(())
}

fn format_year(year: Option<u16>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "unknown year".to_string())
}

fn format_role(character: &str, episodes: Option<u32>) -> String {
    let character = if character.is_empty() { "(uncredited)" } else { character };
    match episodes {
        Some(1) => format!("{} (1 episode)", character),
        Some(n) => format!("{} ({} episodes)", character, n),
        None => character.to_string(),
    }
}

fn print_record(rank: usize, record: &SharedTitleRecord) {
    println!(
        "{}. {} ({})",
        rank.to_string().green(),
        record.title.bold(),
        format_year(record.year)
    );
    println!(
        "   {} / {}",
        format_role(&record.characters[0], record.episodes[0]),
        format_role(&record.characters[1], record.episodes[1])
    );
}

fn print_shared(shared: &SharedFilmography) {
    let [first, second] = &shared.actors;
    println!(
        "{}",
        format!("{} & {}", first.name, second.name).bold().blue()
    );

    if shared.has_shared_work() {
        println!("{} shared titles:", shared.media_list.len());
        for (i, record) in shared.media_list.iter().enumerate() {
            print_record(i + 1, record);
        }
    } else {
        println!("No shared work found");
    }

    if !shared.diagnostics.is_empty() {
        println!(
            "{} {} shared titles dropped for inconsistent data:",
            "!".yellow(),
            shared.diagnostics.len()
        );
        for issue in &shared.diagnostics {
            println!("  - {}", issue);
        }
    }
}

fn print_actor(details: &ActorDetails) {
    let profile = &details.profile;
    println!("{}", format!("{} ({})", profile.name, profile.id).bold().blue());
    if let Some(img) = &profile.img {
        println!("{}Image: {}", "• ".green(), img);
    }
    println!("{}Credits: {}", "• ".cyan(), details.filmography.len());

    for entry in &details.filmography {
        println!(
            "  - {} ({}) as {}",
            entry.title,
            format_year(entry.year),
            format_role(&entry.character, entry.episode_count)
        );
    }
}
