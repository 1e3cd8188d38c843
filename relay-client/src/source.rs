//! Source endpoint: the local system info API

use crate::RelayClient;
use crate::error::{ClientError, Result};
use serde_json::Value;
use tracing::debug;

impl RelayClient {
    /// Fetch the current system info payload
    ///
    /// The body is parsed as JSON but otherwise left untouched.
    ///
    /// # Errors
    /// * [`ClientError::RequestFailed`] on transport errors or timeout
    /// * [`ClientError::ApiError`] on a non-2xx status
    /// * [`ClientError::ParseError`] if the body is not valid JSON
    pub async fn fetch_system_info(&self) -> Result<Value> {
        debug!("GET {}", self.source_url);
        let response = self.client.get(&self.source_url).send().await?;
        let response = self.check_status(response).await?;

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::ParseError(e.to_string()))
    }
}
