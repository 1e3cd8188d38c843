//! Forward poller
//!
//! Fetches the system info from the source, forwards it to the target, then
//! sleeps for the configured interval. A failed cycle is logged and dropped;
//! only shutdown ends the loop.

use relay_client::{ClientError, RelayClient};
use thiserror::Error;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::config::Config;

/// Why a single cycle did not forward anything
#[derive(Debug, Error)]
pub enum CycleError {
    /// GET failed: transport error, timeout or non-2xx status
    #[error("Error fetching data from source: {0}")]
    Fetch(#[source] ClientError),

    /// Source answered but the body was not JSON
    #[error("Error parsing JSON response: {0}")]
    Parse(#[source] ClientError),

    /// POST failed: transport error, timeout or non-2xx status
    #[error("Error forwarding data to target: {0}")]
    Forward(#[source] ClientError),
}

/// Poller that relays one payload per interval until cancelled
pub struct ForwardPoller {
    config: Config,
    client: RelayClient,
    shutdown: CancellationToken,
}

impl ForwardPoller {
    /// Creates a new poller
    ///
    /// `shutdown` is checked at loop boundaries and interrupts the sleep.
    pub fn new(config: Config, client: RelayClient, shutdown: CancellationToken) -> Self {
        Self {
            config,
            client,
            shutdown,
        }
    }

    /// Runs the fetch, forward, sleep loop until the shutdown token is cancelled
    pub async fn run(&self) {
        let interval = self.config.interval();

        loop {
            if self.shutdown.is_cancelled() {
                break;
            }

            match self.forward_once().await {
                Ok(()) => info!("Data successfully forwarded to target URL"),
                Err(e) => error!("{}", e),
            }

            debug!("Sleeping for {:?}", interval);

            tokio::select! {
                _ = time::sleep(interval) => {}
                _ = self.shutdown.cancelled() => break,
            }
        }

        debug!("Forward poller stopped");
    }

    /// Performs a single cycle
    ///
    /// The payload is only forwarded if it was fetched and parsed.
    pub async fn forward_once(&self) -> Result<(), CycleError> {
        let payload = match self.client.fetch_system_info().await {
            Ok(payload) => payload,
            Err(e @ ClientError::ParseError(_)) => return Err(CycleError::Parse(e)),
            Err(e) => return Err(CycleError::Fetch(e)),
        };

        self.client
            .forward(&payload)
            .await
            .map_err(CycleError::Forward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            system_ip: "127.0.0.1:1".to_string(),
            target_url: "http://127.0.0.1:1/ingest".to_string(),
            interval_minutes: 1,
        }
    }

    #[test]
    fn test_cycle_error_messages_name_the_phase() {
        let err = CycleError::Fetch(ClientError::api_error(500, "boom"));
        assert_eq!(
            err.to_string(),
            "Error fetching data from source: API error (status 500): boom"
        );

        let cause = ClientError::ParseError("expected value".to_string());
        let err = CycleError::Parse(cause);
        assert!(err.to_string().starts_with("Error parsing JSON"));

        let err = CycleError::Forward(ClientError::api_error(503, ""));
        assert!(err.to_string().starts_with("Error forwarding data"));
    }

    #[tokio::test]
    async fn test_run_returns_immediately_when_already_cancelled() {
        let config = test_config();
        let client = RelayClient::new(&config.system_ip, &config.target_url).unwrap();
        let shutdown = CancellationToken::new();
        shutdown.cancel();

        let poller = ForwardPoller::new(config, client, shutdown);
        time::timeout(time::Duration::from_secs(1), poller.run())
            .await
            .expect("cancelled poller should not run a cycle");
    }

    #[tokio::test]
    async fn test_unreachable_source_is_fetch_error() {
        let config = test_config();
        let client = RelayClient::new(&config.system_ip, &config.target_url).unwrap();
        let poller = ForwardPoller::new(config, client, CancellationToken::new());

        let err = poller.forward_once().await.unwrap_err();
        assert!(matches!(
            err,
            CycleError::Fetch(ClientError::RequestFailed(_))
        ));
    }
}
