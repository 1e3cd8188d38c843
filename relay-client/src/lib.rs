//! Relay HTTP Client
//!
//! A small, typed HTTP client for the two endpoints the relay talks to:
//! the local system info API (source) and the remote collector (target).
//!
//! Every request is bounded by [`REQUEST_TIMEOUT`].
//!
//! # Example
//!
//! ```no_run
//! use relay_client::RelayClient;
//!
//! #[tokio::main]
//! async fn main() -> relay_client::Result<()> {
//!     let client = RelayClient::new("192.168.1.10", "https://collector.example.com/ingest")?;
//!
//!     let info = client.fetch_system_info().await?;
//!     client.forward(&info).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
mod source;
mod target;

pub use error::{ClientError, Result};

use reqwest::Client;
use std::time::Duration;

/// Upper bound for a single GET or POST
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Path of the system info API on the source host
pub const SYSTEM_INFO_PATH: &str = "/api/system/info";

/// HTTP client relaying system info from a source host to a target URL
#[derive(Debug, Clone)]
pub struct RelayClient {
    /// Full URL of the source endpoint (`http://<host>/api/system/info`)
    source_url: String,
    /// URL payloads are POSTed to
    target_url: String,
    /// HTTP client instance
    client: Client,
}

impl RelayClient {
    /// Create a new relay client with the default request timeout
    ///
    /// # Arguments
    /// * `system_ip` - Host or IP of the source system, optionally with a port
    /// * `target_url` - Destination URL for forwarded payloads
    pub fn new(system_ip: impl AsRef<str>, target_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                ClientError::InvalidRequest(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self::with_client(system_ip, target_url, client))
    }

    /// Create a new relay client with a custom HTTP client
    ///
    /// The caller is responsible for configuring timeouts on `client`.
    pub fn with_client(
        system_ip: impl AsRef<str>,
        target_url: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            source_url: source_url_for(system_ip.as_ref()),
            target_url: target_url.into(),
            client,
        }
    }

    /// URL the system info is fetched from
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// URL payloads are forwarded to
    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and return the error body on failure
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response)
    }
}

/// Builds the source endpoint URL for a host
pub fn source_url_for(system_ip: &str) -> String {
    format!("http://{}{}", system_ip, SYSTEM_INFO_PATH)
}
