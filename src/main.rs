//! Sumi-Rank main entry point
//!
//! This is the command-line interface for the Sumi-Rank crawler.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use sumi_rank::config::{load_config_with_hash, Config};
use sumi_rank::crawler::crawl;
use sumi_rank::output::{build_sinks, export_all, print_report, print_top};
use sumi_rank::storage::{SqliteStorage, Storage};
use tracing_subscriber::EnvFilter;

/// Sumi-Rank: a concurrent link-graph crawler with PageRank scoring
///
/// Sumi-Rank crawls outward from seed URLs in bounded concurrent rounds,
/// builds the link graph of the pages it reached, and ranks them.
#[derive(Parser, Debug)]
#[command(name = "sumi-rank")]
#[command(version = "1.0.0")]
#[command(about = "A concurrent link-graph crawler with PageRank scoring", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show the latest run stored in the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,

    /// Number of top ranked pages to print
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Skip the SQLite export even if a database path is configured
    #[arg(long)]
    no_database: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config, cli.top)?;
    } else {
        handle_crawl(&config, &config_hash, cli.top, !cli.no_database).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_rank=info,warn"),
            1 => EnvFilter::new("sumi_rank=debug,info"),
            2 => EnvFilter::new("sumi_rank=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the validated configuration
fn handle_dry_run(config: &Config) {
    println!("=== Sumi-Rank Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Batch size: {}", config.crawler.batch_size);
    println!(
        "  URL filter: {}",
        config.crawler.filter().unwrap_or("(none)")
    );
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );
    println!(
        "  Max connections per host: {}",
        config.crawler.max_connections_per_host
    );

    println!("\nPageRank:");
    println!("  Damping: {}", config.rank.damping);
    println!("  Epsilon: {}", config.rank.epsilon);
    println!("  Max iterations: {}", config.rank.max_iterations);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!(
        "  Database: {}",
        config.output.database_path.as_deref().unwrap_or("(none)")
    );

    println!("\nSeeds ({}):", config.seeds.len());
    for seed in &config.seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start crawling with {} seed URLs",
        config.seeds.len()
    );
}

/// Handles the --stats mode: shows the latest run from the database
fn handle_stats(config: &Config, top: usize) -> Result<()> {
    let Some(db_path) = config.output.database_path.as_deref() else {
        bail!("No database-path configured in [output]");
    };

    println!("Database: {}\n", db_path);
    let storage = SqliteStorage::new(Path::new(db_path))
        .with_context(|| format!("Failed to open database {}", db_path))?;

    let Some(run) = storage.get_latest_run()? else {
        println!("No runs recorded yet");
        return Ok(());
    };

    println!("=== Run {} ({}) ===\n", run.id, run.status.to_db_string());
    println!("  Started: {}", run.started_at);
    if let Some(finished) = &run.finished_at {
        println!("  Finished: {}", finished);
    }
    println!("  Config hash: {}", run.config_hash);
    println!("  Seeds: {}", run.seeds);
    println!("  Rounds: {}", run.rounds);
    println!("  Pages attempted: {}", run.pages_attempted);
    println!("  Pages stored: {}", storage.count_pages(run.id)?);
    println!("  Links stored: {}", storage.count_links(run.id)?);
    if let (Some(iterations), Some(converged)) = (run.iterations, run.converged) {
        println!(
            "  PageRank: {} iterations, converged: {}",
            iterations,
            if converged { "yes" } else { "no" }
        );
    }

    let mut states: Vec<_> = storage.state_counts(run.id)?.into_iter().collect();
    states.sort_by(|a, b| b.1.cmp(&a.1));
    if !states.is_empty() {
        println!("\nFrontier entries by state:");
        for (state, count) in states {
            println!("  {}: {}", state, count);
        }
    }

    println!("\nTop {} pages:", top);
    for (position, page) in storage.top_pages(run.id, top)?.iter().enumerate() {
        println!("#{}: {:.6} - {}", position + 1, page.rank, page.url);
    }

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: &Config,
    config_hash: &str,
    top: usize,
    use_database: bool,
) -> Result<()> {
    tracing::info!("Total seed URLs: {}", config.seeds.len());

    let mut sinks = build_sinks(config, config_hash, use_database)
        .context("Failed to prepare output sinks")?;

    let result = match crawl(config).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    export_all(&mut sinks, &result).context("Failed to export results")?;

    println!();
    print_top(&result.ranking, top);
    println!();
    print_report(&result.report, &result.ranking);

    Ok(())
}
