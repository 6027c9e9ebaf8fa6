//! `LinkPath`: the chain of pages a successful search returns

use std::fmt;

/// A chain of pages, each linking to the next
///
/// Always holds at least one URL: the start page. The last URL is the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPath(Vec<String>);

impl LinkPath {
    /// Path that starts and ends at the same page
    pub(crate) fn trivial(start: &str) -> Self {
        Self(vec![start.to_owned()])
    }

    /// Wraps a trail walk; `urls` must be non-empty
    pub(crate) fn from_urls(urls: Vec<String>) -> Self {
        debug_assert!(!urls.is_empty(), "a link path needs at least one page");
        Self(urls)
    }

    /// First page of the path
    pub fn start(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or_default()
    }

    /// Last page of the path
    pub fn target(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    /// Number of links followed (pages minus one)
    pub fn hops(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Pages in order from start to target
    pub fn urls(&self) -> &[String] {
        &self.0
    }

    /// Consecutive (from, to) link pairs
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.windows(2).map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}

impl fmt::Display for LinkPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" -> "))
    }
}
