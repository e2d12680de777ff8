//! Engine-Sieve main entry point
//!
//! This is the command-line interface for the Engine-Sieve catalog crawler.

use anyhow::Context;
use clap::Parser;
use engine_sieve::config::{load_config_with_hash, validate, Config};
use engine_sieve::crawler::crawl;
use engine_sieve::url::CatalogMatcher;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Engine-Sieve: a polite catalog crawler for used engine listings
///
/// Engine-Sieve walks the paginated engine catalog, visits every product
/// page it finds, and writes the extracted records as one JSON batch.
#[derive(Parser, Debug)]
#[command(name = "engine-sieve")]
#[command(version)]
#[command(about = "A polite catalog crawler for used engine listings", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults if omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Write the batch artifact here instead of the configured records-path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics of an existing batch artifact and exit
    #[arg(long, value_name = "ARTIFACT", conflicts_with = "dry_run")]
    stats: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if let Some(artifact) = &cli.stats {
        handle_stats(artifact)?;
        return Ok(());
    }

    let mut config = match load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {:#}", e);
            return Err(e.into());
        }
    };

    if let Some(output) = cli.output {
        config.output.records_path = output.to_string_lossy().into_owned();
    }

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_crawl(config).await?;
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
            0 => EnvFilter::new("engine_sieve=info,warn"),
            1 => EnvFilter::new("engine_sieve=debug,info"),
            2 => EnvFilter::new("engine_sieve=trace,debug"),
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

/// Loads the config file, or the built-in defaults when none is given
fn load(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("config file {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            let config = Config::default();
            validate(&config).context("built-in defaults")?;
            Ok(config)
        }
    }
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let seed = CatalogMatcher::new(&config.catalog)
        .and_then(|matcher| matcher.seed_url())
        .context("catalog settings")?;

    println!("=== Engine-Sieve Dry Run ===\n");

    println!("Catalog:");
    println!("  Seed listing: {}", seed);
    println!(
        "  Product pages: {}{}/<id>",
        config.catalog.base_url.trim_end_matches('/'),
        config.catalog.product_path
    );
    println!("  Page parameter: {}", config.catalog.page_param);
    println!("  Source tag: {}", config.catalog.source_tag);
    println!("  Currency: {}", config.catalog.currency);

    println!("\nImages:");
    println!("  Asset prefix: {}", config.images.asset_prefix);
    println!("  Placeholder hints: {}", config.images.placeholder_hints.join(", "));
    println!("  Excluded blocks: {}", config.images.excluded_blocks.join(", "));

    println!("\nCrawler Configuration:");
    println!(
        "  Discovery delay: {}-{}ms",
        config.crawler.discovery_delay_min_ms, config.crawler.discovery_delay_max_ms
    );
    println!(
        "  Product delay: {}-{}ms",
        config.crawler.product_delay_min_ms, config.crawler.product_delay_max_ms
    );
    println!(
        "  Request timeout: {}s (connect {}s)",
        config.crawler.request_timeout_secs, config.crawler.connect_timeout_secs
    );
    println!("  Max redirects: {}", config.crawler.max_redirects);
    match config.crawler.run_timeout_secs {
        Some(secs) => println!("  Run timeout: {}s", secs),
        None => println!("  Run timeout: none"),
    }

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Records: {}", config.output.records_path);

    println!("\n✓ Configuration is valid");
    println!("✓ Would start discovery at {}", seed);

    Ok(())
}

/// Handles the --stats mode: shows statistics of a batch artifact
fn handle_stats(artifact: &Path) -> anyhow::Result<()> {
    use engine_sieve::output::{load_statistics, print_statistics};

    println!("Artifact: {}\n", artifact.display());

    let stats = load_statistics(artifact)
        .with_context(|| format!("reading artifact {}", artifact.display()))?;

    print_statistics(&stats);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Crawling {}{} into {}",
        config.catalog.base_url.trim_end_matches('/'),
        config.catalog.listing_path,
        config.output.records_path
    );

    match crawl(config).await {
        Ok(report) => {
            print!("{}", report.render());
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
