//! Search coordinator - owns the shared search state and the worker pool
//!
//! This module contains the top-level search logic:
//! - Validating the start and target pages
//! - Seeding the frontier and trail with the start page
//! - Spawning the worker pool and waiting for it to wind down
//! - Enforcing the visit and time budgets
//! - Rebuilding the path from the trail

use super::frontier::Frontier;
use super::path::LinkPath;
use super::trail::Trail;
use super::worker::{Worker, WorkerReport};
use super::{LinkExtractor, PageFetcher, ProgressCallback, SearchOptions};
use crate::url::parse_page_url;
use crate::{Budget, SearchError, SearchResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};
use tokio::task::{JoinError, JoinSet};
use tracing::Instrument;

/// Why the search stopped before the frontier ran dry
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Halt {
    /// A worker saw the target among the links of `parent`
    Found { parent: String },
    /// A budget ran out first
    Budget(Budget),
}

/// State shared by the coordinator and every worker of one search
pub(crate) struct SearchState {
    pub(crate) start: String,
    pub(crate) target: String,
    pub(crate) frontier: Frontier,
    pub(crate) trail: Trail,
    /// Set once, by whichever halt cause gets there first
    halt: OnceLock<Halt>,
    admitted: AtomicUsize,
    max_visited: Option<usize>,
}

impl SearchState {
    fn new(start: &str, target: &str, max_visited: Option<usize>) -> Self {
        Self {
            start: start.to_owned(),
            target: target.to_owned(),
            frontier: Frontier::new(),
            trail: Trail::new(),
            halt: OnceLock::new(),
            admitted: AtomicUsize::new(0),
            max_visited,
        }
    }

    pub(crate) fn is_halted(&self) -> bool {
        self.halt.get().is_some()
    }

    fn halt_reason(&self) -> Option<&Halt> {
        self.halt.get()
    }

    /// Records a halt cause and closes the frontier
    ///
    /// Returns false if another cause was recorded first.
    fn halt(&self, reason: Halt) -> bool {
        let won = self.halt.set(reason).is_ok();
        self.frontier.close();
        won
    }

    /// Raises the found signal with `parent` as the target's discoverer
    ///
    /// Only the first caller wins; it records the target in the trail and
    /// closes the frontier. Everyone else gets false.
    pub(crate) fn declare_found(&self, parent: &str) -> bool {
        let found = Halt::Found {
            parent: parent.to_owned(),
        };
        if self.halt.set(found).is_err() {
            return false;
        }
        self.trail.claim(&self.target, Some(parent));
        self.frontier.close();
        true
    }

    /// Reserves one page visit against the visit budget
    ///
    /// Returns the 1-based visit number, or `None` once the budget is spent
    /// (which also halts the search).
    pub(crate) fn admit_visit(&self) -> Option<usize> {
        let sequence = self.admitted.fetch_add(1, Ordering::SeqCst) + 1;
        match self.max_visited {
            Some(max) if sequence > max => {
                if self.halt(Halt::Budget(Budget::VisitLimit(max))) {
                    tracing::warn!("Visit limit of {} reached", max);
                }
                None
            }
            _ => Some(sequence),
        }
    }
}

/// Counters for one finished search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Pages fetched successfully
    pub pages_fetched: usize,

    /// Fetches that failed and were skipped
    pub fetch_failures: usize,

    /// URLs claimed in the trail (start and target included)
    pub urls_claimed: usize,

    /// Size of the worker pool
    pub workers: usize,

    /// Wall-clock time of the search
    pub elapsed: Duration,
}

impl SearchStats {
    fn from_reports(reports: &[WorkerReport], urls_claimed: usize, elapsed: Duration) -> Self {
        Self {
            pages_fetched: reports.iter().map(|r| r.pages_fetched).sum(),
            fetch_failures: reports.iter().map(|r| r.fetch_failures).sum(),
            urls_claimed,
            workers: reports.len(),
            elapsed,
        }
    }

    /// Successful fetches per second
    pub fn pages_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.pages_fetched as f64 / secs
        } else {
            0.0
        }
    }
}

/// Result of a successful search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub path: LinkPath,
    pub stats: SearchStats,
}

/// Main search coordinator
///
/// Holds the collaborators and settings; every call to [`Coordinator::search`]
/// builds fresh shared state, so one coordinator can run many searches.
pub struct Coordinator {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn LinkExtractor>,
    workers: usize,
    options: SearchOptions,
    progress_callback: Option<ProgressCallback>,
}

impl Coordinator {
    /// Creates a new coordinator
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Page content source shared by all workers
    /// * `extractor` - Link extraction shared by all workers
    /// * `workers` - Size of the worker pool (must be at least 1)
    /// * `options` - Budgets and verbosity
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn LinkExtractor>,
        workers: usize,
        options: SearchOptions,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            workers,
            options,
            progress_callback: None,
        }
    }

    /// Calls `callback` once for every page fetched
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Searches for a path from `start` to `target`
    ///
    /// # Returns
    ///
    /// * `Ok(SearchReport)` - The path and search counters
    /// * `Err(SearchError::InvalidInput)` - Bad endpoints or an empty pool
    /// * `Err(SearchError::PathNotFound)` - Every reachable page was explored
    /// * `Err(SearchError::ExhaustedBudget)` - A visit or time limit hit first
    pub async fn search(&self, start: &str, target: &str) -> SearchResult<SearchReport> {
        let started = Instant::now();
        self.validate(start, target)?;

        if start == target {
            tracing::info!("Start and target are the same page: {}", start);
            return Ok(SearchReport {
                path: LinkPath::trivial(start),
                stats: SearchStats {
                    urls_claimed: 1,
                    elapsed: started.elapsed(),
                    ..SearchStats::default()
                },
            });
        }

        tracing::info!(
            "Searching for {} from {} with {} workers",
            target,
            start,
            self.workers
        );

        let search = Arc::new(SearchState::new(start, target, self.options.max_visited));
        search.trail.claim(start, None);
        search.frontier.enqueue(start.to_owned());

        let mut pool = JoinSet::new();
        for id in 0..self.workers {
            let worker = Worker::new(
                id,
                search.clone(),
                self.fetcher.clone(),
                self.extractor.clone(),
                self.progress_callback.clone(),
                self.options.verbose,
            );
            pool.spawn(worker.run().instrument(tracing::info_span!("worker", id)));
        }

        let reports = match self.await_workers(&search, &mut pool).await {
            Ok(reports) => reports,
            Err(e) => {
                search.frontier.close();
                pool.abort_all();
                return Err(e.into());
            }
        };

        let stats = SearchStats::from_reports(&reports, search.trail.len(), started.elapsed());
        tracing::info!(
            "Search finished: {} pages fetched, {} failed, {} URLs claimed in {:?}",
            stats.pages_fetched,
            stats.fetch_failures,
            stats.urls_claimed,
            stats.elapsed
        );

        Self::conclude(&search, stats)
    }

    fn validate(&self, start: &str, target: &str) -> SearchResult<()> {
        if self.workers == 0 {
            return Err(SearchError::InvalidInput(
                "worker count must be at least 1".to_string(),
            ));
        }

        parse_page_url(start)
            .map_err(|e| SearchError::InvalidInput(format!("start '{}': {}", start, e)))?;
        parse_page_url(target)
            .map_err(|e| SearchError::InvalidInput(format!("target '{}': {}", target, e)))?;

        Ok(())
    }

    /// Waits for every worker to stop, enforcing the deadline if one is set
    async fn await_workers(
        &self,
        search: &SearchState,
        pool: &mut JoinSet<WorkerReport>,
    ) -> Result<Vec<WorkerReport>, JoinError> {
        let mut reports = Vec::with_capacity(self.workers);

        match self.options.timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, collect_reports(pool, &mut reports)).await {
                    Ok(joined) => joined?,
                    Err(_) => {
                        if search.halt(Halt::Budget(Budget::Deadline(limit))) {
                            tracing::warn!("Search deadline of {:?} passed, stopping workers", limit);
                        }
                        // Workers finish their current fetch, then see the closed frontier
                        collect_reports(pool, &mut reports).await?;
                    }
                }
            }
            None => collect_reports(pool, &mut reports).await?,
        }

        Ok(reports)
    }

    /// Turns the final shared state into the search outcome
    fn conclude(search: &SearchState, stats: SearchStats) -> SearchResult<SearchReport> {
        match search.halt_reason() {
            Some(Halt::Found { parent }) => {
                tracing::debug!("Target {} discovered from {}", search.target, parent);
                let urls = search.trail.path_to(&search.target)?;
                let path = LinkPath::from_urls(urls);
                tracing::info!("Found a {}-hop path", path.hops());
                Ok(SearchReport { path, stats })
            }
            Some(Halt::Budget(budget)) => Err(SearchError::ExhaustedBudget {
                budget: *budget,
                fetched: stats.pages_fetched,
            }),
            None => Err(SearchError::PathNotFound {
                start: search.start.clone(),
                target: search.target.clone(),
                claimed: stats.urls_claimed,
            }),
        }
    }
}

async fn collect_reports(
    pool: &mut JoinSet<WorkerReport>,
    reports: &mut Vec<WorkerReport>,
) -> Result<(), JoinError> {
    while let Some(joined) = pool.join_next().await {
        reports.push(joined?);
    }
    Ok(())
}
