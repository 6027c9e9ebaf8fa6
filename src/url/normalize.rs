use crate::config::LinksConfig;
use crate::url::parse_page_url;
use crate::UrlResult;
use url::Url;

/// Tracking query parameters removed during canonicalization
const TRACKING_PARAMS: &[&str] = &[
    "fbclid", "gclid", "mc_eid", "ref", "source", "wprov",
];

/// Canonicalizes an extracted link so equal pages share one identity
///
/// Only the rules enabled in `config` are applied:
/// - `strip_fragments`: drop "#section"
/// - `strip_tracking_params`: drop utm_* and known tracking parameters,
///   keeping the order of the remaining ones
///
/// Path and host are left as the parser produced them; article paths are
/// case-sensitive.
pub fn canonicalize_link(mut url: Url, config: &LinksConfig) -> Url {
    if config.strip_fragments {
        url.set_fragment(None);
    }

    if config.strip_tracking_params && url.query().is_some() {
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| !is_tracking_param(key))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        if kept.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(kept);
        }
    }

    url
}

/// Parses an endpoint string and canonicalizes it with the same rules the
/// link extractor applies, so start/target identities match extracted links
///
/// # Examples
///
/// ```
/// use link_racer::config::LinksConfig;
/// use link_racer::url::canonicalize_str;
///
/// let url = canonicalize_str(
///     "https://en.wikipedia.org/wiki/Peace#History",
///     &LinksConfig::wikipedia(),
/// )
/// .unwrap();
/// assert_eq!(url, "https://en.wikipedia.org/wiki/Peace");
/// ```
pub fn canonicalize_str(url_str: &str, config: &LinksConfig) -> UrlResult<String> {
    let url = parse_page_url(url_str)?;
    Ok(canonicalize_link(url, config).into())
}

/// Checks if a query parameter is a tracking parameter
fn is_tracking_param(key: &str) -> bool {
    TRACKING_PARAMS.contains(&key) || key.starts_with("utm_")
}
