//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building one shared client with the configured identity and timeout
//! - GET requests for listing pages (as text) and images (as bytes)
//! - Error classification into [`TransportError`]
//!
//! There is no retry. A failed request is reported to the caller, which
//! decides how much work to abandon.

use crate::config::CrawlerConfig;
use crate::{TransportError, TransportResult};
use reqwest::{Client, Response};

/// Builds an HTTP client with proper configuration
///
/// The client sends the configured User-Agent on every request and gives up
/// on any request that takes longer than the configured timeout. Redirects
/// follow reqwest's default policy.
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use cover_grab::config::CrawlerConfig;
/// use cover_grab::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sends a GET request and rejects any non-2xx response
async fn get_checked(client: &Client, url: &str) -> TransportResult<Response> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| TransportError::from_reqwest(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(TransportError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response)
}

/// Fetches a page and returns its body as text
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Timeout (connect or body) | `TransportError::Timeout` |
/// | Connection refused, DNS, TLS | `TransportError::Connect` |
/// | Any non-2xx status | `TransportError::Status` |
/// | Anything else | `TransportError::Request` |
pub async fn fetch_text(client: &Client, url: &str) -> TransportResult<String> {
    let response = get_checked(client, url).await?;
    response
        .text()
        .await
        .map_err(|e| TransportError::from_reqwest(url, e))
}

/// Fetches a resource and returns its raw bytes
///
/// Errors are classified the same way as [`fetch_text`].
pub async fn fetch_bytes(client: &Client, url: &str) -> TransportResult<Vec<u8>> {
    let response = get_checked(client, url).await?;
    response
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|e| TransportError::from_reqwest(url, e))
}
