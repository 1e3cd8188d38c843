use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{Level, info};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use relay_client::RelayClient;
use relay_runner::shutdown::ShutdownSignals;
use relay_runner::{Config, ForwardPoller};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Errors and warnings to stderr, everything else to stdout
    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .or_else(std::io::stdout);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relay_runner=info,relay_client=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    let config = Config::from_env().context("Invalid configuration")?;

    let client = RelayClient::new(&config.system_ip, &config.target_url)
        .context("Failed to initialize HTTP client")?;

    // Handlers are in place before anything is printed
    let token = CancellationToken::new();
    let signals = ShutdownSignals::install();

    info!(
        "Starting data forwarder with interval {} minutes",
        config.interval_minutes
    );
    info!(
        "Source: {}, target: {}",
        client.source_url(), client.target_url()
    );

    tokio::spawn(signals.wait(token.clone()));

    let poller = ForwardPoller::new(config, client, token);
    poller.run().await;

    Ok(())
}
