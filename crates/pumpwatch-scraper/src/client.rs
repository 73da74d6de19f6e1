use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, StatusCode};

use crate::error::FetchError;
use crate::types::RetailerFeed;

/// Connect timeout applied on top of the overall request timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the retailer feeds and the scheme page.
///
/// Wraps a single `reqwest::Client` so every request in a run shares the
/// same connection pool, timeout, and headers.
#[derive(Debug, Clone)]
pub struct FeedClient {
    pub(crate) client: Client,
}

impl FeedClient {
    /// Build a client with the configured per-request timeout and
    /// `User-Agent`. Compressed responses are decoded transparently.
    ///
    /// # Errors
    ///
    /// Returns the underlying builder error, e.g. when the TLS backend
    /// cannot be initialised or the `User-Agent` is not a valid header
    /// value.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-GB"));

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch and decode one retailer price feed.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] naming the failing URL: `InvalidUrl` for
    /// unparseable URLs, `NotFound` for 404, `UnexpectedStatus` for other
    /// non-success statuses, `TimedOut`/`Transport` for request-level
    /// failures, and `Deserialize` when the body is not a decodable feed.
    pub async fn fetch_feed(&self, url: &str) -> Result<RetailerFeed, FetchError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::transport(e, url))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::transport(e, url))?;
        serde_json::from_str(&body).map_err(|source| FetchError::Deserialize {
            url: url.to_string(),
            source,
        })
    }
}
