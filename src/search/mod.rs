//! Search module: concurrent shortest-path discovery over the link graph
//!
//! This module contains the path search itself and its collaborators:
//! - `Frontier`: closeable FIFO of discovered-but-unvisited pages
//! - `Trail`: visited registry recording who discovered each page first
//! - `Worker`: dequeue, fetch, extract, claim, enqueue
//! - `Coordinator`: owns the shared state, runs the pool, rebuilds the path
//! - `HttpFetcher` / `HtmlLinkExtractor`: the HTTP and HTML collaborators
//!
//! The core only talks to `PageFetcher` and `LinkExtractor`, so tests and
//! other front-ends can plug in their own graph.

mod coordinator;
mod extractor;
mod fetcher;
mod frontier;
mod path;
mod trail;
mod worker;

pub use coordinator::{Coordinator, SearchReport, SearchStats};
pub use extractor::HtmlLinkExtractor;
pub use fetcher::{build_http_client, HttpFetcher};
pub use frontier::Frontier;
pub use path::LinkPath;
pub use trail::Trail;
pub use worker::{Visit, WorkerReport};

use crate::config::SearchConfig;
use crate::{FetchError, SearchResult};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Worker pool size used when none is configured
pub const DEFAULT_WORKERS: usize = 10;

/// Callback invoked once per fetched page
pub type ProgressCallback = Arc<dyn Fn(&Visit) + Send + Sync>;

/// Retrieves page content for a URL
///
/// Retries, connection limits, and politeness are the fetcher's own business;
/// the search treats every error as "skip this page".
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Pulls the outgoing links out of fetched content
///
/// Returns absolute URLs in document order. Duplicates are allowed; the
/// search deduplicates through its visited registry.
pub trait LinkExtractor: Send + Sync {
    fn extract_links(&self, content: &str, base_url: &str) -> Vec<String>;
}

/// Limits and reporting for one search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of pages to visit before giving up
    pub max_visited: Option<usize>,

    /// Overall search deadline
    ///
    /// Checked between fetches only. When it passes, no new page is started,
    /// but fetches already in flight run to completion, so a search can end
    /// later than the deadline by up to one full fetch. For `HttpFetcher`
    /// that is bounded by `request-timeout-secs * (max-retries + 1)` plus the
    /// retry delays.
    pub timeout: Option<Duration>,

    /// Log every visited page at info level
    pub verbose: bool,
}

impl From<&SearchConfig> for SearchOptions {
    fn from(config: &SearchConfig) -> Self {
        Self {
            max_visited: config.max_visited,
            timeout: config.timeout_secs.map(Duration::from_secs),
            verbose: config.verbose,
        }
    }
}

/// Finds a path of hyperlinks from `start` to `target`
///
/// Convenience wrapper around [`Coordinator`] that returns only the path.
///
/// # Arguments
///
/// * `start` - Absolute URL of the page to start from
/// * `target` - Absolute URL of the page to reach
/// * `worker_count` - Number of concurrent workers
/// * `options` - Visit/time budgets and verbosity
/// * `fetcher` - Page content source
/// * `extractor` - Link extraction from page content
///
/// # Returns
///
/// * `Ok(LinkPath)` - `[start, ..., target]`
/// * `Err(SearchError)` - invalid input, no path, or budget exhausted
///
/// # Example
///
/// ```no_run
/// use link_racer::config::Config;
/// use link_racer::search::{find_shortest_path, HtmlLinkExtractor, HttpFetcher, SearchOptions};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let fetcher = Arc::new(HttpFetcher::new(&config.user_agent, &config.fetcher)?);
/// let extractor = Arc::new(HtmlLinkExtractor::new(config.links.clone()));
/// let path = find_shortest_path(
///     "https://en.wikipedia.org/wiki/The_Emoji_Movie",
///     "https://en.wikipedia.org/wiki/Vietnam_War",
///     10,
///     SearchOptions::default(),
///     fetcher,
///     extractor,
/// )
/// .await?;
/// println!("{}", path);
/// # Ok(())
/// # }
/// ```
pub async fn find_shortest_path(
    start: &str,
    target: &str,
    worker_count: usize,
    options: SearchOptions,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn LinkExtractor>,
) -> SearchResult<LinkPath> {
    let coordinator = Coordinator::new(fetcher, extractor, worker_count, options);
    let report = coordinator.search(start, target).await?;
    Ok(report.path)
}
