//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the search, including:
//! - Building HTTP clients with proper user agent strings
//! - Capping the number of requests in flight
//! - Retry logic for transient failures
//! - Error classification

use super::PageFetcher;
use crate::config::{FetcherConfig, UserAgentConfig};
use crate::FetchError;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client, StatusCode};
use std::time::Duration;
use tokio::sync::Semaphore;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `config` - Timeouts, pooling, and redirect limits
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use link_racer::config::{FetcherConfig, UserAgentConfig};
/// use link_racer::search::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    config: &FetcherConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::limited(config.max_redirects))
        .pool_max_idle_per_host(config.max_idle_per_host)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Outcome of a single request attempt
enum Attempt {
    Done(Result<String, FetchError>),
    Retry(FetchError),
}

/// Fetches HTML pages over HTTP(S)
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 404 | Immediate → NotFound |
/// | HTTP 429 | Immediate → RateLimited |
/// | HTTP 5xx | Retry up to `max_retries` times |
/// | Timeout | Retry up to `max_retries` times |
/// | Other non-2xx | Immediate → HttpStatus |
/// | Connection error | Immediate → Network |
/// | Non-HTML body | Immediate → NotHtml |
pub struct HttpFetcher {
    client: Client,
    permits: Semaphore,
    max_retries: u32,
    retry_delay: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher with its own client
    pub fn new(user_agent: &UserAgentConfig, config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(user_agent, config)?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, config: &FetcherConfig) -> Self {
        Self {
            client,
            permits: Semaphore::new(config.max_concurrent_requests.max(1)),
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    async fn attempt(&self, url: &str) -> Attempt {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Attempt::Retry(FetchError::Network {
                    url: url.to_string(),
                    message: "Request timeout".to_string(),
                })
            }
            Err(e) => {
                return Attempt::Done(Err(FetchError::Network {
                    url: url.to_string(),
                    message: e.to_string(),
                }))
            }
        };

        let status = response.status();
        tracing::debug!("Got response [{}] for URL: {}", status, url);

        if status == StatusCode::NOT_FOUND {
            return Attempt::Done(Err(FetchError::NotFound {
                url: url.to_string(),
            }));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Attempt::Done(Err(FetchError::RateLimited {
                url: url.to_string(),
            }));
        }

        if status.is_server_error() {
            return Attempt::Retry(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            return Attempt::Done(Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains("html") {
            return Attempt::Done(Err(FetchError::NotHtml {
                url: url.to_string(),
                content_type,
            }));
        }

        match response.text().await {
            Ok(body) => Attempt::Done(Ok(body)),
            Err(e) if e.is_timeout() => Attempt::Retry(FetchError::Network {
                url: url.to_string(),
                message: "Timed out reading body".to_string(),
            }),
            Err(e) => Attempt::Done(Err(FetchError::Network {
                url: url.to_string(),
                message: e.to_string(),
            })),
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let _permit = self.permits.acquire().await.map_err(|e| FetchError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let mut retries = 0;
        loop {
            match self.attempt(url).await {
                Attempt::Done(result) => return result,
                Attempt::Retry(error) if retries < self.max_retries => {
                    retries += 1;
                    tracing::debug!(
                        "Retrying {} ({}/{}) after: {}",
                        url,
                        retries,
                        self.max_retries,
                        error
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Attempt::Retry(error) => return Err(error),
            }
        }
    }
}
