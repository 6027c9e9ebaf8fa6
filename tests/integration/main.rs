//! Integration tests for the path search
//!
//! `graph_search` drives the coordinator over in-memory link graphs;
//! `http_search` runs the real HTTP fetcher and HTML extractor against a
//! wiremock server.

mod graph_search;
mod http_search;

use async_trait::async_trait;
use link_racer::search::{LinkExtractor, PageFetcher};
use link_racer::FetchError;
use rand::Rng;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// URL of a node in a test graph
pub fn node(name: &str) -> String {
    format!("https://graph.test/wiki/{}", name)
}

/// In-memory link graph served through `PageFetcher`
///
/// A page's body is its outgoing links, one per line. Unknown pages and
/// pages marked as failing return `FetchError::NotFound`.
#[derive(Default)]
pub struct GraphFetcher {
    pages: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    max_latency_ms: u64,
    calls: AtomicUsize,
    fetched: Mutex<HashMap<String, usize>>,
}

impl GraphFetcher {
    /// Builds a graph from `(from, to)` edges, in link order
    pub fn from_edges(edges: &[(&str, &str)]) -> Self {
        let mut graph = Self::default();
        for (from, to) in edges {
            graph.add_edge(&node(from), &node(to));
        }
        graph
    }

    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.pages
            .entry(from.to_string())
            .or_default()
            .push(to.to_string());
    }

    /// Registers a page with no outgoing links
    pub fn add_page(&mut self, url: &str) {
        self.pages.entry(url.to_string()).or_default();
    }

    pub fn fail(mut self, name: &str) -> Self {
        self.failing.insert(node(name));
        self
    }

    /// Sleeps a random 0..=`ms` milliseconds per fetch
    pub fn with_latency(mut self, ms: u64) -> Self {
        self.max_latency_ms = ms;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// How many times each URL was fetched
    pub fn fetch_counts(&self) -> HashMap<String, usize> {
        self.fetched.lock().unwrap().clone()
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.pages
            .get(from)
            .is_some_and(|links| links.iter().any(|l| l == to))
    }

    /// Hop distance from `start` to `target` by plain BFS, skipping failing pages
    pub fn distance(&self, start: &str, target: &str) -> Option<usize> {
        let mut seen = HashSet::from([start.to_string()]);
        let mut queue = VecDeque::from([(start.to_string(), 0)]);

        while let Some((url, depth)) = queue.pop_front() {
            if url == target {
                return Some(depth);
            }
            if self.failing.contains(&url) {
                continue;
            }
            for link in self.pages.get(&url).into_iter().flatten() {
                if seen.insert(link.clone()) {
                    queue.push_back((link.clone(), depth + 1));
                }
            }
        }

        None
    }
}

#[async_trait]
impl PageFetcher for GraphFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .fetched
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default() += 1;

        if self.max_latency_ms > 0 {
            let delay = rand::rng().random_range(0..=self.max_latency_ms);
            tokio::time::sleep(Duration::from_millis(delay)).await;
        } else {
            tokio::task::yield_now().await;
        }

        if self.failing.contains(url) {
            return Err(FetchError::NotFound {
                url: url.to_string(),
            });
        }

        self.pages
            .get(url)
            .map(|links| links.join("\n"))
            .ok_or_else(|| FetchError::NotFound {
                url: url.to_string(),
            })
    }
}

/// Treats every non-empty line of a page as a link
pub struct LineExtractor;

impl LinkExtractor for LineExtractor {
    fn extract_links(&self, content: &str, _base_url: &str) -> Vec<String> {
        content
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}
