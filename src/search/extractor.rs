//! HTML link extraction
//!
//! Pulls `<a href>` targets out of a page, resolves them against the page URL,
//! canonicalizes them, and keeps the ones the link filter allows.
//!
//! **Excluded:**
//! - `<a href="..." download>`
//! - `javascript:`, `mailto:`, `tel:` links
//! - Data URIs
//! - Fragment-only links (same-page anchors)
//! - Anything that is not HTTP(S) after resolution
//!
//! `rel="nofollow"` links are followed.

use super::LinkExtractor;
use crate::config::LinksConfig;
use crate::url::{canonicalize_link, classify_link};
use scraper::{Html, Selector};
use url::Url;

/// Extracts followable links from HTML pages
#[derive(Debug, Clone, Default)]
pub struct HtmlLinkExtractor {
    links: LinksConfig,
}

impl HtmlLinkExtractor {
    pub fn new(links: LinksConfig) -> Self {
        Self { links }
    }

    /// Extractor that only keeps English Wikipedia articles
    pub fn wikipedia() -> Self {
        Self::new(LinksConfig::wikipedia())
    }

    /// Canonicalizes `url` and checks it against the link filter
    fn accept(&self, url: Url) -> Option<String> {
        let url = canonicalize_link(url, &self.links);
        let verdict = classify_link(&url, &self.links);
        if verdict.should_follow() {
            Some(url.to_string())
        } else {
            tracing::trace!("Dropping {} ({:?})", url, verdict);
            None
        }
    }
}

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_links(&self, content: &str, base_url: &str) -> Vec<String> {
        let base = match Url::parse(base_url) {
            Ok(base) => base,
            Err(e) => {
                tracing::warn!("Cannot resolve links against {}: {}", base_url, e);
                return Vec::new();
            }
        };

        let document = Html::parse_document(content);
        let mut links = Vec::new();

        if let Ok(a_selector) = Selector::parse("a[href]") {
            for element in document.select(&a_selector) {
                if element.value().attr("download").is_some() {
                    continue;
                }

                if let Some(href) = element.value().attr("href") {
                    if let Some(link) = resolve_link(href, &base).and_then(|u| self.accept(u)) {
                        links.push(link);
                    }
                }
            }
        }

        links
    }
}

/// Resolves a link href to an absolute HTTP(S) URL
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    match absolute_url.scheme() {
        "http" | "https" => Some(absolute_url),
        _ => None,
    }
}
