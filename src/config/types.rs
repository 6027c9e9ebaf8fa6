use serde::Deserialize;

/// Main configuration structure for Link-Racer
///
/// Every section is optional in the TOML file; missing sections fall back to
/// their defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub fetcher: FetcherConfig,
    pub links: LinksConfig,
}

/// Search behavior configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of concurrent workers draining the frontier
    pub workers: usize,

    /// Maximum number of pages to visit before giving up
    #[serde(rename = "max-visited")]
    pub max_visited: Option<usize>,

    /// Overall search deadline (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: Option<u64>,

    /// Report every visited page
    pub verbose: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            max_visited: None,
            timeout_secs: None,
            verbose: false,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "link-racer".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/link-racer".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the user agent header value
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Total time allowed for one request (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Time allowed to establish a connection (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Retries after a 5xx response or a timeout
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Delay between retries (milliseconds)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,

    /// Maximum number of requests in flight at once
    #[serde(rename = "max-concurrent-requests")]
    pub max_concurrent_requests: usize,

    /// Idle pooled connections kept per host
    #[serde(rename = "max-idle-per-host")]
    pub max_idle_per_host: usize,

    /// Redirect hops followed before giving up
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            max_retries: 2,
            retry_delay_ms: 500,
            max_concurrent_requests: 100,
            max_idle_per_host: 100,
            max_redirects: 10,
        }
    }
}

/// Link filtering applied by the HTML link extractor
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Domain patterns links must match (e.g. "*.wikipedia.org"); empty allows all
    #[serde(rename = "allowed-domains")]
    pub allowed_domains: Vec<String>,

    /// Path prefix links must start with (e.g. "/wiki/")
    #[serde(rename = "path-prefix")]
    pub path_prefix: Option<String>,

    /// Drop pages whose path contains ':' after the prefix (File:, Special:, ...)
    #[serde(rename = "skip-namespaced")]
    pub skip_namespaced: bool,

    /// Remove "#fragment" from links
    #[serde(rename = "strip-fragments")]
    pub strip_fragments: bool,

    /// Remove utm_* and similar tracking query parameters
    #[serde(rename = "strip-tracking-params")]
    pub strip_tracking_params: bool,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            allowed_domains: Vec::new(),
            path_prefix: None,
            skip_namespaced: false,
            strip_fragments: true,
            strip_tracking_params: true,
        }
    }
}

impl LinksConfig {
    /// Article-only filtering for English Wikipedia
    pub fn wikipedia() -> Self {
        Self {
            allowed_domains: vec!["en.wikipedia.org".to_string()],
            path_prefix: Some("/wiki/".to_string()),
            skip_namespaced: true,
            strip_fragments: true,
            strip_tracking_params: true,
        }
    }
}
