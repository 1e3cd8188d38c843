//! Signal-driven shutdown
//!
//! SIGINT and SIGTERM are turned into a cancelled [`CancellationToken`].
//! The poller observes the token between cycles.

use tokio_util::sync::CancellationToken;
use tracing::info;
#[cfg(unix)]
use tracing::warn;

#[cfg(unix)]
use tokio::signal::unix::{Signal, SignalKind, signal};

/// Signal handlers that are already registered with the runtime
///
/// Signals delivered after [`ShutdownSignals::install`] returns are kept
/// until [`ShutdownSignals::wait`] observes them.
pub struct ShutdownSignals {
    #[cfg(unix)]
    interrupt: Option<Signal>,
    #[cfg(unix)]
    terminate: Option<Signal>,
}

impl ShutdownSignals {
    /// Registers the SIGINT and SIGTERM handlers
    ///
    /// Must be called from within a tokio runtime. A handler that cannot be
    /// registered is logged and never fires.
    pub fn install() -> Self {
        Self {
            #[cfg(unix)]
            interrupt: register(SignalKind::interrupt(), "SIGINT"),
            #[cfg(unix)]
            terminate: register(SignalKind::terminate(), "SIGTERM"),
        }
    }

    /// Waits for the first signal, then cancels `token`
    ///
    /// Returns without logging if `token` is cancelled elsewhere first.
    pub async fn wait(self, token: CancellationToken) {
        tokio::select! {
            _ = self.received() => {}
            _ = token.cancelled() => return,
        }

        info!("Exiting gracefully...");
        token.cancel();
    }

    #[cfg(unix)]
    async fn received(self) {
        let Self {
            mut interrupt,
            mut terminate,
        } = self;

        tokio::select! {
            _ = recv(interrupt.as_mut()) => {}
            _ = recv(terminate.as_mut()) => {}
        }
    }

    #[cfg(not(unix))]
    async fn received(self) {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(unix)]
fn register(kind: SignalKind, name: &str) -> Option<Signal> {
    match signal(kind) {
        Ok(stream) => Some(stream),
        Err(e) => {
            warn!("Failed to install {} handler: {}", name, e);
            None
        }
    }
}

#[cfg(unix)]
async fn recv(stream: Option<&mut Signal>) {
    match stream {
        Some(stream) => {
            stream.recv().await;
        }
        None => std::future::pending::<()>().await,
    }
}
