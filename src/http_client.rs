//! HTTP client wrapper for the scraping pipeline.
//!
//! Features:
//! - Connection pooling with keep-alive (each resolve hits the same hosts
//!   three times)
//! - TLS via rustls
//! - Brotli/Gzip/Deflate decompression (auto-negotiated)
//! - Limited redirect following, with the final URL exposed so callers can
//!   re-derive the site root after a domain hop
//! - Optional per-request `Referer` override (the extraction endpoint
//!   authenticates the listing site's referer)

use std::time::Duration;

use reqwest::header::REFERER;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::error::Result;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0";

/// Pooled HTTP client shared across all fetches of one resolver.
pub struct SiteClient {
    client: Client,
}

impl SiteClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .redirect(reqwest::redirect::Policy::limited(10))
            .cookie_store(true)
            .build()?;

        Ok(Self { client })
    }

    /// GET a URL and return the body as text.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        debug!(status = %response.status(), "response received");
        Ok(response.text().await?)
    }

    /// GET a URL with an explicit `Referer` header.
    #[instrument(skip(self), fields(url = %url, referer = %referer))]
    pub async fn get_text_with_referer(&self, url: &str, referer: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .header(REFERER, referer)
            .send()
            .await?
            .error_for_status()?;
        debug!(status = %response.status(), "response received");
        Ok(response.text().await?)
    }

    /// GET a URL and return `(final_url, body)`.
    ///
    /// `final_url` is the URL after redirects; the listing site hops domains
    /// periodically, and hrefs must be absolutized against where the page
    /// actually came from.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_final(&self, url: &str) -> Result<(String, String)> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let final_url = response.url().to_string();
        debug!(status = %response.status(), final_url = %final_url, "response received");
        let body = response.text().await?;
        Ok((final_url, body))
    }

    /// Get the underlying reqwest client.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}
