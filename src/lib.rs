//! Link-Racer: shortest hyperlink paths between web pages
//!
//! This crate explores the link graph outward from a start page with a pool
//! of concurrent workers until a target page is discovered, then walks the
//! discovery trail back to report the path taken.

pub mod config;
pub mod output;
pub mod search;
pub mod state;
pub mod url;

use std::time::Duration;
use thiserror::Error;

/// Terminal failures of a single path search
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No path from {start} to {target} ({claimed} pages explored)")]
    PathNotFound {
        start: String,
        target: String,
        claimed: usize,
    },

    #[error("Search budget exhausted ({budget}) after {fetched} pages")]
    ExhaustedBudget { budget: Budget, fetched: usize },

    #[error("Worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("Trail has no entry for {0}")]
    BrokenTrail(String),
}

/// The limit that cut a search short
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// The configured maximum number of page visits was reached
    VisitLimit(usize),
    /// The overall search deadline passed
    Deadline(Duration),
}

impl std::fmt::Display for Budget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VisitLimit(max) => write!(f, "visit limit of {} reached", max),
            Self::Deadline(limit) => write!(f, "deadline of {:?} passed", limit),
        }
    }
}

/// Errors reported by a page fetcher
///
/// The search core treats every kind the same way: log, skip, continue.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Rate limited by {url}")]
    RateLimited { url: String },

    #[error("Page not found: {url}")]
    NotFound { url: String },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Expected HTML from {url}, got {content_type}")]
    NotHtml { url: String, content_type: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

/// Result type alias for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

// Re-export commonly used types
pub use config::Config;
pub use search::{
    find_shortest_path, Coordinator, HtmlLinkExtractor, HttpFetcher, LinkExtractor, LinkPath,
    PageFetcher, SearchOptions, SearchReport,
};
pub use state::WorkerState;
