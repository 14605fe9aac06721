//! HTTP client wrapper for the remote file server.
//!
//! This module provides the `RemoteClient` struct which issues the listing,
//! scan and download requests with timeout configuration and status checks.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::RemoteError;
use crate::user_agent;

/// HTTP client for the remote file server.
///
/// Created once per process and cloned into every request; clones share the
/// underlying connection pool.
///
/// # Example
///
/// ```no_run
/// use charfetch_core::remote::RemoteClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RemoteClient::new()?;
/// let listing = client.fetch_text("http://localhost:8080").await?;
/// println!("{listing}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
}

impl RemoteClient {
    /// Creates a new client with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Read timeout: 5 minutes between reads; a response that keeps
    ///   streaming is never cut off
    /// - Gzip decompression: enabled
    ///
    /// # Errors
    ///
    /// Returns the reqwest builder error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a new client with explicit timeout values.
    ///
    /// # Errors
    ///
    /// Returns the reqwest builder error if the TLS backend cannot be initialized.
    pub fn new_with_timeouts(
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .read_timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()?;
        Ok(Self { client })
    }

    /// Sends a GET request and verifies the response has a success status.
    ///
    /// The body is left unread so callers can stream it.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Network`] or [`RemoteError::Timeout`] when the
    /// request cannot complete, and [`RemoteError::HttpStatus`] for any
    /// non-2xx response.
    #[instrument(level = "debug", skip(self), fields(url = %url))]
    pub async fn get(&self, url: &str) -> Result<reqwest::Response, RemoteError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RemoteError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "remote returned error status");
            return Err(RemoteError::http_status(url, status.as_u16()));
        }

        Ok(response)
    }

    /// Fetches a URL and returns its full body as text.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`get`](Self::get), plus
    /// [`RemoteError::Network`] if the body cannot be read.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_text(&self, url: &str) -> Result<String, RemoteError> {
        let response = self.get(url).await?;
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::network(url, e))?;
        debug!(bytes = body.len(), "fetched remote document");
        Ok(body)
    }
}

/// Validates a remote file server base URL.
///
/// # Errors
///
/// Returns [`RemoteError::InvalidUrl`] if the URL is malformed, has no host,
/// or uses a scheme other than http/https.
pub fn parse_base_url(raw: &str) -> Result<Url, RemoteError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|_| RemoteError::invalid_url(trimmed))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(RemoteError::invalid_url(trimmed));
    }
    Ok(url)
}

/// Builds the URL of a file published under `base_url`.
///
/// The file name is appended as `{base}/{name}`; a trailing slash on the base
/// is not doubled.
#[must_use]
pub fn file_url(base_url: &str, file_name: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), file_name)
}
