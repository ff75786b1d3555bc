//! Blocking HTTP fetch-and-parse.
//!
//! Transport failures stay in [`FetchError`] and never reach the decoder; the
//! decoder only sees the response body once it has been fully received.
//!
//! # Example
//!
//! ```rust,no_run
//! use mediarss_rs::fetch::{FeedClient, FetchConfig};
//! use mediarss_rs::CancelHandle;
//!
//! let client = FeedClient::new(FetchConfig::default()).unwrap();
//! let cancel = CancelHandle::new();
//!
//! match client.fetch_and_parse("https://example.com/feed.xml", &[("page", "2")], &cancel) {
//!     Some(Ok(channel)) => println!("{} items", channel.item_count()),
//!     Some(Err(e)) => eprintln!("Error: {}", e),
//!     None => println!("cancelled"),
//! }
//! ```

use crate::context::CancelHandle;
use crate::error::Error;
use crate::objects::Channel;
use crate::reader::parse_cancellable;
use std::io::Read;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_BODY_BYTES: u64 = 10 * 1024 * 1024; // 10MB

/// Errors raised while fetching a feed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, timeout)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// HTTP response with a non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// The connection failed while the body was being read
    #[error("Failed to read response body: {0}")]
    BodyRead(#[source] std::io::Error),
    /// Response body exceeded the configured size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// The feed URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The body was received but could not be decoded
    #[error("Parse error: {0}")]
    Parse(#[from] Error),
}

/// Configuration for [`FeedClient`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Whole-request timeout
    pub timeout: Duration,
    /// `User-Agent` header sent with every request
    pub user_agent: String,
    /// Largest response body accepted, in bytes
    pub max_body_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("mediarss-rs/{}", crate::VERSION),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl FetchConfig {
    /// Creates a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the response size limit.
    pub fn with_max_body_bytes(mut self, max: u64) -> Self {
        self.max_body_bytes = max;
        self
    }
}

/// HTTP client that downloads a feed and hands the body to the decoder.
///
/// Each call to [`FeedClient::fetch_and_parse`] runs its own decode, so one
/// client can serve any number of sequential or concurrent fetches.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: reqwest::blocking::Client,
    config: FetchConfig,
}

impl FeedClient {
    /// Builds a client from `config`.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Builds the request URL, appending `params` as query pairs in order.
    pub fn request_url(url: &str, params: &[(&str, &str)]) -> Result<Url, FetchError> {
        let mut url = Url::parse(url.trim()).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    /// Fetches `url` and decodes the body.
    ///
    /// Returns `None` when `cancel` fires before the decode completes. A
    /// cancelled fetch stops before sending the request if it can, and
    /// otherwise discards the body.
    pub fn fetch_and_parse(
        &self,
        url: &str,
        params: &[(&str, &str)],
        cancel: &CancelHandle,
    ) -> Option<Result<Channel, FetchError>> {
        if cancel.is_cancelled() {
            return None;
        }
        let body = match self.fetch_body(url, params) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(url, error = %e, "Feed fetch failed");
                return Some(Err(e));
            }
        };
        tracing::debug!(url, bytes = body.len(), "Fetched feed");

        parse_cancellable(body.as_slice(), cancel).map(|result| result.map_err(FetchError::from))
    }

    fn fetch_body(&self, url: &str, params: &[(&str, &str)]) -> Result<Vec<u8>, FetchError> {
        let url = Self::request_url(url, params)?;
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let limit = self.config.max_body_bytes;
        if response.content_length().is_some_and(|len| len > limit) {
            return Err(FetchError::ResponseTooLarge);
        }

        read_body(response, limit)
    }
}

/// Reads at most `limit` bytes of a response body.
fn read_body<R: Read>(body: R, limit: u64) -> Result<Vec<u8>, FetchError> {
    // Read one byte past the limit to detect oversized chunked bodies
    let mut buf = Vec::new();
    body.take(limit.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(FetchError::BodyRead)?;
    if buf.len() as u64 > limit {
        return Err(FetchError::ResponseTooLarge);
    }
    Ok(buf)
}
