//! Target endpoint: the remote collector

use crate::RelayClient;
use crate::error::Result;
use serde_json::Value;
use tracing::debug;

impl RelayClient {
    /// POST a payload to the target URL as JSON
    ///
    /// The response body is discarded on success.
    pub async fn forward(&self, payload: &Value) -> Result<()> {
        debug!("POST {}", self.target_url);
        let response = self
            .client
            .post(&self.target_url)
            .json(payload)
            .send()
            .await?;

        self.check_status(response).await?;
        Ok(())
    }
}
