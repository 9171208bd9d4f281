//! cover-grab main entry point
//!
//! This is the command-line interface for the cover-grab crawler.

use anyhow::Context;
use clap::Parser;
use cover_grab::config::{load_config_with_hash, Config};
use cover_grab::crawler::{crawl, PageRequest};
use cover_grab::output::print_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// cover-grab: download one cover image per item from paginated listings
///
/// Walks a fixed range of listing pages, picks the featured image of every
/// content item, and saves it once into a flat directory. Re-running skips
/// images that are already on disk.
#[derive(Parser, Debug)]
#[command(name = "cover-grab")]
#[command(version)]
#[command(about = "Download cover images from paginated listings", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults if omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Write images here instead of the configured output directory
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the resolved configuration and page URLs without crawling
    #[arg(long)]
    dry_run: bool,
}

// One request at a time; a single-threaded runtime is all the crawl needs
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    if let Some(dir) = cli.output_dir {
        config.output.directory = dir;
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("cover_grab=info,warn"),
            1 => EnvFilter::new("cover_grab=debug,info"),
            2 => EnvFilter::new("cover_grab=trace,debug"),
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

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== cover-grab Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!(
        "  Pages: {} to {} (inclusive)",
        config.site.first_page, config.site.last_page
    );

    println!("\nCrawler:");
    println!("  Pause between pages: {}ms", config.crawler.pause_ms);
    println!("  Request timeout: {}s", config.crawler.timeout_secs);
    println!("  User agent: {}", config.crawler.user_agent);

    println!("\nSelectors:");
    println!("  Container: {}", config.selectors.container);
    println!("  Featured image: {}", config.selectors.featured_image);
    println!("  Fallback image: {}", config.selectors.fallback_image);

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory.display());

    println!("\nPage URLs:");
    for page in config.site.pages() {
        println!("  {}", PageRequest::new(page).url(&config.site.base_url));
    }
}

/// Handles the normal crawl mode
async fn handle_crawl(config: Config, quiet: bool) -> anyhow::Result<()> {
    tracing::info!(
        "Crawling {} pages {}..={}, saving to {}",
        config.site.base_url,
        config.site.first_page,
        config.site.last_page,
        config.output.directory.display()
    );

    let report = crawl(config).await.context("crawl could not start")?;

    if !quiet {
        print_report(&report);
    }

    Ok(())
}
