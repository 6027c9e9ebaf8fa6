//! URL handling module for Link-Racer
//!
//! This module provides endpoint validation, link canonicalization, domain
//! extraction, wildcard matching, and link classification against the
//! `[links]` configuration.

mod domain;
mod normalize;

use crate::config::LinksConfig;
use crate::{UrlError, UrlResult};
use url::Url;

// Re-export main functions
pub use domain::{extract_domain, matches_wildcard};
pub use normalize::{canonicalize_link, canonicalize_str};

/// Outcome of checking a link against the link filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkVerdict {
    /// Link passes every rule and should be reported
    Follow,
    /// Host does not match any allowed domain pattern
    ForeignDomain,
    /// Path does not start with the configured prefix
    OutsidePrefix,
    /// Path names a namespaced page (e.g. "File:", "Special:")
    Namespaced,
}

impl LinkVerdict {
    /// Returns true if the link should be followed
    pub fn should_follow(&self) -> bool {
        matches!(self, Self::Follow)
    }
}

/// Parses a search endpoint (start or target page)
///
/// Endpoints must be absolute http(s) URLs with a host.
///
/// # Examples
///
/// ```
/// use link_racer::url::parse_page_url;
///
/// assert!(parse_page_url("https://en.wikipedia.org/wiki/Peace").is_ok());
/// assert!(parse_page_url("Peace").is_err());
/// assert!(parse_page_url("ftp://example.com/file").is_err());
/// ```
pub fn parse_page_url(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Classifies a link according to the link filter configuration
///
/// Rules are checked in order:
/// 1. Allowed domains (skipped when the list is empty)
/// 2. Path prefix (skipped when unset)
/// 3. Namespaced pages: a ':' in the path after the prefix
pub fn classify_link(url: &Url, config: &LinksConfig) -> LinkVerdict {
    if !config.allowed_domains.is_empty() {
        let allowed = extract_domain(url).is_some_and(|domain| {
            config
                .allowed_domains
                .iter()
                .any(|pattern| matches_wildcard(pattern, &domain))
        });
        if !allowed {
            return LinkVerdict::ForeignDomain;
        }
    }

    let path = url.path();
    let rest = match &config.path_prefix {
        Some(prefix) => match path.strip_prefix(prefix.as_str()) {
            Some(rest) => rest,
            None => return LinkVerdict::OutsidePrefix,
        },
        None => path,
    };

    // Percent-encoded colons count too ("File%3AMap.png")
    if config.skip_namespaced && (rest.contains(':') || rest.to_ascii_uppercase().contains("%3A"))
    {
        return LinkVerdict::Namespaced;
    }

    LinkVerdict::Follow
}
