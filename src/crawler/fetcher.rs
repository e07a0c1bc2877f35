//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building one HTTP client carrying the fixed request header set
//! - GET requests returning the page body as text
//! - Error classification into `FetchError`
//!
//! No retries happen here. A failed page is reported to the caller, which
//! decides whether the run continues.

use crate::config::RequestConfig;
use crate::{ConfigError, CrawlerError, FetchError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with the configured headers installed as defaults
///
/// # Arguments
///
/// * `config` - The request configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(CrawlerError)` - A header was malformed or the client failed to build
///
/// # Example
///
/// ```no_run
/// use listing_crawler::config::RequestConfig;
/// use listing_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&RequestConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &RequestConfig) -> Result<Client, CrawlerError> {
    let headers = build_headers(config)?;

    let client = Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Converts the configured header table into a `HeaderMap`
fn build_headers(config: &RequestConfig) -> Result<HeaderMap, ConfigError> {
    let mut headers = HeaderMap::with_capacity(config.headers.len());

    for (name, value) in &config.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ConfigError::Validation(format!("Invalid header name: '{}'", name)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| ConfigError::Validation(format!("Invalid value for header '{}'", name)))?;
        headers.insert(name, value);
    }

    Ok(headers)
}

/// Fetches a URL and returns its body as text
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx status | `Ok(body)` |
/// | Any other status (including 304) | `FetchError::Status` |
/// | Connect error, timeout, body read error | `FetchError::Http` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await.map_err(|source| FetchError::Http {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| FetchError::Http {
        url: url.to_string(),
        source,
    })
}
