//! HTTP client for Ceneo requests using wreq for TLS fingerprint emulation.

use crate::config::Config;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Trait for fetching review pages - enables mocking for tests.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Fetches a page and returns its HTML.
    async fn fetch(&self, url: &str) -> Result<String>;

    /// Scheme and host that relative links are resolved against.
    fn base_url(&self) -> String;

    /// URL of the first reviews page of a product.
    fn reviews_url(&self, product_id: &str) -> String {
        format!("{}/{}#tab=reviews", self.base_url(), urlencoding::encode(product_id))
    }
}

/// Ceneo HTTP client with browser impersonation.
pub struct CeneoClient {
    client: Client,
    base_url: String,
}

impl CeneoClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        // Configure proxy if specified
        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).map_err(|e| Error::ParseFailed {
                what: format!("proxy URL {}", proxy_url),
                reason: e.to_string(),
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| Error::FetchFailed {
            url: config.base_url.clone(),
            status: None,
            reason: format!("failed to build HTTP client: {}", e),
        })?;

        Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_string() })
    }
}

#[async_trait]
impl ReviewSource for CeneoClient {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let fetch_failed = |status: Option<u16>, reason: String| Error::FetchFailed {
            url: url.to_string(),
            status,
            reason,
        };

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8")
            .header("Accept-Language", "pl-PL,pl;q=0.9,en;q=0.8")
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
            .header("Sec-Fetch-Dest", "document")
            .header("Sec-Fetch-Mode", "navigate")
            .header("Sec-Fetch-Site", "none")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .map_err(|e| fetch_failed(None, e.to_string()))?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            if status == 429 || status == 503 {
                warn!("Blocked or throttled by Ceneo ({}). Consider using a proxy.", status);
            }
            return Err(fetch_failed(
                Some(status.as_u16()),
                format!("request failed with status: {}", status),
            ));
        }

        response.text().await.map_err(|e| fetch_failed(None, format!("failed to read body: {}", e)))
    }

    fn base_url(&self) -> String {
        self.base_url.clone()
    }
}
