//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - The [`PageFetcher`] capability the discoverer and run loop depend on
//! - Building the HTTP client with the crawler's user agent string
//! - Bounded redirect following
//! - Error classification into [`FetchError`]
//!
//! There are no retries: a failed listing page aborts discovery and a failed
//! product page is skipped by the run loop.

use crate::config::Config;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Retrieves the HTML body of a page
///
/// Implemented over reqwest for real runs and by in-memory maps in tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` and returns its body as text
    ///
    /// Non-2xx responses are errors.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration (user agent, timeouts, redirect limit)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use engine_sieve::config::Config;
/// use engine_sieve::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = config.user_agent.header_value();

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.crawler.connect_timeout_secs))
        .redirect(Policy::limited(config.crawler.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageFetcher`] backed by a reqwest [`Client`]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if response.url().as_str() != url {
            tracing::debug!("{} redirected to {}", url, response.url());
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }
}

fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
