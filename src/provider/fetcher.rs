//! HTTP fetcher implementation
//!
//! This module handles every page request the provider makes, search pages
//! and detail pages alike. A request is a single plain GET: no retries, no
//! custom headers and no timeout beyond the transport defaults.

use crate::FetchError;
use async_trait::async_trait;
use reqwest::Client;

/// Source of raw page markup
///
/// The provider fetches through this trait so the transport can be swapped
/// out, for example by an instrumented double in tests. Implementations are
/// shared between concurrently running fetch tasks.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` and returns the response body
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Builds the HTTP client shared by all page fetches
///
/// No user agent or other default headers are set, and timeouts are left
/// to the transport.
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client (e.g. TLS backend unavailable)
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder().gzip(true).brotli(true).build()
}

/// Production fetcher backed by a `reqwest` client
///
/// `reqwest::Client` keeps its connection pool behind an `Arc`, so one
/// instance is safely shared by every concurrent fetch task and reuses
/// connections to the catalog host.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a freshly built client
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client()?))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    /// Fetches a URL, requiring a 2xx status
    ///
    /// # Errors
    ///
    /// | Condition | Error |
    /// |-----------|-------|
    /// | DNS, connect, TLS or timeout failure | `FetchError::Transport` |
    /// | Non-2xx status | `FetchError::Status` |
    /// | Body cannot be read or decoded | `FetchError::Transport` |
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
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

        response.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })
    }
}
