//! Relay Runner
//!
//! Periodically fetches the system info JSON from a local host and forwards it
//! unchanged to a remote URL.
//!
//! Architecture:
//! - Configuration: three required environment variables, read once
//! - Scheduler: the fetch, forward, sleep loop
//! - Shutdown: SIGINT/SIGTERM mapped onto a cancellation token

pub mod config;
pub mod scheduler;
pub mod shutdown;

pub use config::Config;
pub use scheduler::{CycleError, ForwardPoller};
