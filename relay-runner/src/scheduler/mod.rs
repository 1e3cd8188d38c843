//! Scheduler layer for the relay
//!
//! Drives the fetch, forward, sleep loop until shutdown is requested.

pub mod poller;

pub use poller::{CycleError, ForwardPoller};
