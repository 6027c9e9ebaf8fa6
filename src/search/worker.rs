//! Search worker loop
//!
//! Each worker repeatedly:
//! 1. Waits on the frontier for a URL (stops when it closes)
//! 2. Fetches the page (failures are logged and skipped)
//! 3. Extracts links in document order
//! 4. Raises the found signal on the target, otherwise claims and enqueues
//!    every link nobody has claimed yet
//!
//! Halts are only noticed between steps; an in-flight fetch always finishes.

use super::coordinator::SearchState;
use super::{LinkExtractor, PageFetcher, ProgressCallback};
use crate::state::WorkerState;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// One fetched page, as reported to progress callbacks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    /// Order in which the visit was admitted (1-based, across all workers)
    pub sequence: usize,

    /// Worker that fetched the page
    pub worker: usize,

    /// The fetched page
    pub url: String,

    /// Page that linked to it (`None` for the start page)
    pub parent: Option<String>,
}

/// What a worker did before it stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    pub id: usize,
    pub pages_fetched: usize,
    pub fetch_failures: usize,
    pub final_state: WorkerState,
}

pub(crate) struct Worker {
    id: usize,
    search: Arc<SearchState>,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn LinkExtractor>,
    progress: Option<ProgressCallback>,
    verbose: bool,
    state: WorkerState,
    pages_fetched: usize,
    fetch_failures: usize,
}

impl Worker {
    pub(crate) fn new(
        id: usize,
        search: Arc<SearchState>,
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn LinkExtractor>,
        progress: Option<ProgressCallback>,
        verbose: bool,
    ) -> Self {
        Self {
            id,
            search,
            fetcher,
            extractor,
            progress,
            verbose,
            state: WorkerState::Running,
            pages_fetched: 0,
            fetch_failures: 0,
        }
    }

    /// Runs until the frontier closes or the search halts
    pub(crate) async fn run(mut self) -> WorkerReport {
        debug!("Worker {} started", self.id);

        while self.state.accepts_work() && !self.search.is_halted() {
            let Some(url) = self.search.frontier.dequeue().await else {
                break;
            };

            self.visit(&url).await;
            self.search.frontier.task_done();
        }

        self.transition(WorkerState::Stopped);
        debug!(
            "Worker {} stopped after {} pages ({} failed)",
            self.id, self.pages_fetched, self.fetch_failures
        );

        WorkerReport {
            id: self.id,
            pages_fetched: self.pages_fetched,
            fetch_failures: self.fetch_failures,
            final_state: self.state,
        }
    }

    async fn visit(&mut self, url: &str) {
        let Some(sequence) = self.search.admit_visit() else {
            self.transition(WorkerState::Draining);
            return;
        };

        let content = match self.fetcher.fetch(url).await {
            Ok(content) => content,
            Err(e) => {
                // The page stays claimed; its links are simply never seen
                self.fetch_failures += 1;
                warn!("Skipping {}: {}", url, e);
                return;
            }
        };
        self.pages_fetched += 1;
        self.report_progress(sequence, url);

        if self.search.is_halted() {
            self.transition(WorkerState::Draining);
            return;
        }

        let links = self.extractor.extract_links(&content, url);
        trace!("{} links on {}", links.len(), url);
        self.expand(url, links);
    }

    fn expand(&mut self, url: &str, links: Vec<String>) {
        for link in links {
            if link == self.search.target {
                if self.search.declare_found(url) {
                    info!("Found path to {} (via {})", link, url);
                }
                self.transition(WorkerState::Draining);
                return;
            }

            if self.search.is_halted() {
                self.transition(WorkerState::Draining);
                return;
            }

            if self.search.trail.claim(&link, Some(url)) {
                self.search.frontier.enqueue(link);
            }
        }
    }

    fn report_progress(&self, sequence: usize, url: &str) {
        if !self.verbose && self.progress.is_none() {
            return;
        }

        let parent = self.search.trail.parent_of(url);

        if self.verbose {
            info!(
                "{}: worker-{} checked {}, from {}",
                sequence,
                self.id,
                url,
                parent.as_deref().unwrap_or("(start)")
            );
        }

        if let Some(ref callback) = self.progress {
            callback(&Visit {
                sequence,
                worker: self.id,
                url: url.to_owned(),
                parent,
            });
        }
    }

    fn transition(&mut self, next: WorkerState) {
        if self.state.can_transition_to(next) {
            trace!("Worker {}: {} -> {}", self.id, self.state, next);
            self.state = next;
        }
    }
}
