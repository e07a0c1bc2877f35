//! Listing-Crawler main entry point
//!
//! This is the command-line interface for the listing crawler and the
//! archive extractor. Without arguments it crawls using the built-in
//! configuration.

use anyhow::Context;
use clap::{Parser, Subcommand};
use listing_crawler::archive::{extract_all, ExtractOptions};
use listing_crawler::config::{load_config_with_hash, Config};
use listing_crawler::crawler::crawl;
use listing_crawler::output::{print_crawl_summary, print_extraction_summary};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Listing-Crawler: a polite paginated listing harvester
///
/// Discovers how many pages a novel listing has, then writes the titles on
/// each page to `download/<page>.txt`, pausing a few seconds between pages.
#[derive(Parser, Debug)]
#[command(name = "listing-crawler")]
#[command(version = "1.0.0")]
#[command(about = "A polite paginated listing harvester", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the listing and write one file per page (default)
    Crawl {
        /// Validate config and show what would be crawled without crawling
        #[arg(long)]
        dry_run: bool,
    },

    /// Extract every archive found in the download directory
    Extract {
        /// Directory scanned for archives (overrides the config)
        #[arg(long, value_name = "DIR")]
        source: Option<PathBuf>,

        /// Directory receiving the extracted files (overrides the config)
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    match cli.command.unwrap_or(Command::Crawl { dry_run: false }) {
        Command::Crawl { dry_run: true } => handle_dry_run(&config),
        Command::Crawl { dry_run: false } => handle_crawl(config).await,
        Command::Extract { source, dest } => handle_extract(config, source, dest),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("listing_crawler=info,warn"),
            1 => EnvFilter::new("listing_crawler=debug,info"),
            2 => EnvFilter::new("listing_crawler=trace,debug"),
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

/// Handles `crawl --dry-run`: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    listing_crawler::config::validate(config)?;

    println!("=== Listing-Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Start URL: {}", config.crawler.start_url());
    println!("  Page URL template: {}", config.crawler.page_url_template);
    println!("  Title selector: {}", config.crawler.title_selector);
    println!("  Last page selector: {}", config.crawler.last_page_selector);
    println!(
        "  Delay between pages: {}-{}s",
        config.crawler.min_delay_secs, config.crawler.max_delay_secs
    );

    println!("\nRequest Headers ({}):", config.request.headers.len());
    for (name, value) in &config.request.headers {
        println!("  {}: {}", name, value);
    }
    println!("  Timeout: {}s", config.request.timeout_secs);

    println!("\nOutput:");
    println!("  Download directory: {}", config.output.download_dir.display());

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting crawl of {} into {}",
        config.crawler.page_url_template,
        config.output.download_dir.display()
    );

    match crawl(config).await {
        Ok(summary) => {
            print_crawl_summary(&summary);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl aborted: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the `extract` subcommand
fn handle_extract(
    config: Config,
    source: Option<PathBuf>,
    dest: Option<PathBuf>,
) -> anyhow::Result<()> {
    let options = ExtractOptions::from_config(&config.archive)?;
    let source = source.unwrap_or(config.archive.source_dir);
    let dest = dest.unwrap_or(config.archive.extract_dir);

    tracing::info!(
        "Extracting archives from {} into {}",
        source.display(),
        dest.display()
    );

    let summary = extract_all(&source, &dest, &options)
        .with_context(|| format!("Failed to scan {}", source.display()))?;
    print_extraction_summary(&summary);

    Ok(())
}
