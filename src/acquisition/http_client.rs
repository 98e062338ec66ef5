//! HTTP fetch boundary.
//!
//! All network access goes through the [`Fetch`] trait so that resolution
//! and traversal can run against stub transports in tests. The production
//! implementation wraps reqwest with a fixed header set and a timeout.

use crate::config::Settings;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;
use tracing::warn;

/// Retrieve the body of a URL, or nothing if it could not be retrieved.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch `url` and return its body on a 2xx response.
    ///
    /// Transport errors, timeouts, and non-2xx statuses all collapse to
    /// `None`; callers cannot distinguish the cause. Failures are logged
    /// here, never raised.
    async fn fetch(&self, url: &str) -> Option<String>;
}

/// reqwest-backed fetcher with a configured User-Agent and timeout.
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&settings.user_agent)?);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpClient {
    async fn fetch(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("failed to fetch {url}: {e}");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("failed to fetch {url}: status {}", response.status());
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!("failed to read body from {url}: {e}");
                None
            }
        }
    }
}
