use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use link_racer::url::extract_domain;
///
/// let url = Url::parse("https://EN.Wikipedia.org/wiki/Peace").unwrap();
/// assert_eq!(extract_domain(&url), Some("en.wikipedia.org".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks if a domain matches a wildcard pattern
///
/// "example.com" matches only itself; "*.example.com" matches the bare
/// domain and any subdomain depth. The candidate is expected in lowercase.
///
/// # Examples
///
/// ```
/// use link_racer::url::matches_wildcard;
///
/// assert!(matches_wildcard("*.wikipedia.org", "en.wikipedia.org"));
/// assert!(matches_wildcard("*.wikipedia.org", "wikipedia.org"));
/// assert!(!matches_wildcard("en.wikipedia.org", "de.wikipedia.org"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    match pattern.strip_prefix("*.") {
        Some(base) => {
            candidate == base
                || candidate
                    .strip_suffix(base)
                    .is_some_and(|head| head.ends_with('.'))
        }
        None => candidate == pattern,
    }
}
