//! Link-Racer main entry point
//!
//! This is the command-line interface for the Link-Racer path finder.

use anyhow::Context;
use clap::Parser;
use link_racer::config::{load_config_with_hash, validate, Config, LinksConfig};
use link_racer::output::{print_path, print_statistics};
use link_racer::search::{Coordinator, HtmlLinkExtractor, HttpFetcher, SearchOptions};
use link_racer::url::{canonicalize_str, parse_page_url};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const WIKIPEDIA_ARTICLE_BASE: &str = "https://en.wikipedia.org/wiki/";

/// Link-Racer: shortest hyperlink paths between web pages
///
/// Link-Racer follows links outward from the start page with a pool of
/// concurrent workers until it reaches the target page, then prints the
/// chain of pages it took to get there.
#[derive(Parser, Debug)]
#[command(name = "link-racer")]
#[command(version)]
#[command(about = "Finds a short chain of links between two web pages", long_about = None)]
struct Cli {
    /// Page to start from (URL, or article title with --wikipedia)
    #[arg(value_name = "START")]
    start: String,

    /// Page to reach (URL, or article title with --wikipedia)
    #[arg(value_name = "TARGET")]
    target: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Number of concurrent workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Give up after visiting this many pages
    #[arg(long, value_name = "N")]
    max_visited: Option<usize>,

    /// Give up after this many seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Restrict the search to English Wikipedia articles
    #[arg(long)]
    wikipedia: bool,

    /// Log every page as it is checked
    #[arg(long)]
    progress: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;

    let start = resolve_endpoint(&cli.start, cli.wikipedia, &config.links)
        .with_context(|| format!("Invalid start page: {}", cli.start))?;
    let target = resolve_endpoint(&cli.target, cli.wikipedia, &config.links)
        .with_context(|| format!("Invalid target page: {}", cli.target))?;

    let fetcher = HttpFetcher::new(&config.user_agent, &config.fetcher)
        .context("Failed to build HTTP client")?;
    let extractor = HtmlLinkExtractor::new(config.links.clone());

    let coordinator = Coordinator::new(
        Arc::new(fetcher),
        Arc::new(extractor),
        config.search.workers,
        SearchOptions::from(&config.search),
    );

    match coordinator.search(&start, &target).await {
        Ok(report) => {
            print_path(&report.path);
            println!();
            print_statistics(&report.stats);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Search failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_racer=info,warn"),
            1 => EnvFilter::new("link_racer=debug,info"),
            2 => EnvFilter::new("link_racer=trace,debug"),
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

/// Loads the config file (if any) and applies command-line overrides
fn load_effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(workers) = cli.workers {
        config.search.workers = workers;
    }
    if cli.max_visited.is_some() {
        config.search.max_visited = cli.max_visited;
    }
    if cli.timeout.is_some() {
        config.search.timeout_secs = cli.timeout;
    }
    if cli.progress {
        config.search.verbose = true;
    }
    if cli.wikipedia {
        config.links = LinksConfig::wikipedia();
    }

    validate(&config).context("Invalid settings")?;
    Ok(config)
}

/// Turns a command-line endpoint into the canonical URL the search uses
///
/// With `wikipedia`, anything that is not already a URL is treated as an
/// article title.
fn resolve_endpoint(input: &str, wikipedia: bool, links: &LinksConfig) -> anyhow::Result<String> {
    let input = input.trim();
    let url = if wikipedia && parse_page_url(input).is_err() {
        wikipedia_article_url(input)
    } else {
        input.to_string()
    };

    Ok(canonicalize_str(&url, links)?)
}

fn wikipedia_article_url(title: &str) -> String {
    format!("{}{}", WIKIPEDIA_ARTICLE_BASE, title.replace(' ', "_"))
}
