//! Read-through HTTP fetching
//!
//! Every request goes through the `CacheStore` first: a hit returns the
//! cached value immediately with no delay and no network traffic, a miss
//! waits a courtesy delay, performs the request, and stores the result
//! before returning it. Failures on a miss propagate unmodified; there is
//! no retry.

use reqwest::Client;
use serde_json::Value;
use std::io;
use std::time::Duration;
use thiserror::Error;

use crate::cache::{request_key, CacheStore};

/// Default pause before each live request, to stay under upstream rate limits
const DEFAULT_COURTESY_DELAY: Duration = Duration::from_secs(1);

/// Errors that can occur on a cache miss
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The cache file could not be rewritten
    #[error("Failed to persist cache: {0}")]
    Cache(#[from] io::Error),
}

/// HTTP client with a read-through cache policy
#[derive(Debug, Clone)]
pub struct Fetcher {
    http: Client,
    courtesy_delay: Duration,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher {
    /// Creates a Fetcher with the default one-second courtesy delay
    pub fn new() -> Self {
        Self {
            http: Client::new(),
            courtesy_delay: DEFAULT_COURTESY_DELAY,
        }
    }

    /// Overrides the courtesy delay (useful for tests and local mirrors)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.courtesy_delay = delay;
        self
    }

    /// Fetches a page as text, keyed by the URL verbatim
    ///
    /// A cache hit returns immediately. On a miss the courtesy delay elapses
    /// first, then the page is fetched, stored, and returned.
    pub async fn fetch_page(
        &self,
        url: &str,
        cache: &mut CacheStore,
    ) -> Result<String, FetchError> {
        // A cached non-string value can only come from external edits to the
        // cache file; treat it as a miss and refetch.
        if let Some(Value::String(text)) = cache.get(url) {
            tracing::info!(%url, "using cache");
            return Ok(text.clone());
        }

        tracing::info!(%url, "fetching");
        tokio::time::sleep(self.courtesy_delay).await;
        let text = self.http.get(url).send().await?.text().await?;
        cache.put(url, Value::String(text.clone()))?;
        Ok(text)
    }

    /// Fetches an API response as parsed JSON, keyed by endpoint + params
    ///
    /// The key comes from `request_key`, so parameter order does not affect
    /// caching. On a miss the body is decoded before being stored, so the
    /// cache holds the parsed document rather than raw text.
    pub async fn fetch_api(
        &self,
        base: &str,
        params: &[(&str, &str)],
        cache: &mut CacheStore,
    ) -> Result<Value, FetchError> {
        let key = request_key(base, params);
        if let Some(value) = cache.get(&key) {
            tracing::info!(endpoint = %base, "using cache");
            return Ok(value.clone());
        }

        tracing::info!(endpoint = %base, "fetching");
        tokio::time::sleep(self.courtesy_delay).await;
        let text = self
            .http
            .get(base)
            .query(params)
            .send()
            .await?
            .text()
            .await?;
        let value: Value = serde_json::from_str(&text)?;
        cache.put(key, value.clone())?;
        Ok(value)
    }
}
