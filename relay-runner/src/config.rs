//! Relay configuration
//!
//! All settings come from three required environment variables and are
//! read once at startup. There are no defaults: a missing value is fatal.

use anyhow::{Context, bail};
use std::time::Duration;

/// Host/IP of the source system
pub const SYSTEM_IP_VAR: &str = "SYSTEM_IP";
/// Destination URL payloads are POSTed to
pub const TARGET_URL_VAR: &str = "TARGET_URL";
/// Polling interval in minutes
pub const INTERVAL_VAR: &str = "INTERVAL";

/// Relay configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Host or IP of the source system, optionally with a port
    pub system_ip: String,

    /// URL forwarded payloads are POSTed to
    pub target_url: String,

    /// Time between two cycles, in minutes
    pub interval_minutes: u64,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables (all required):
    /// - SYSTEM_IP
    /// - TARGET_URL
    /// - INTERVAL (minutes, integer > 0)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Creates configuration from an arbitrary variable source
    ///
    /// Variables are checked in the order SYSTEM_IP, TARGET_URL, INTERVAL and
    /// the first problem is reported.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> anyhow::Result<String> {
            match lookup(name) {
                Some(value) if !value.is_empty() => Ok(value),
                _ => bail!("{} environment variable is not set", name),
            }
        };

        let system_ip = required(SYSTEM_IP_VAR)?;
        let target_url = required(TARGET_URL_VAR)?;
        let raw_interval = required(INTERVAL_VAR)?;

        // Surrounding whitespace is ignored
        let trimmed = raw_interval.trim();
        let interval: i64 = trimmed.parse().with_context(|| {
            format!(
                "{} must be an integer (minutes), got '{}'",
                INTERVAL_VAR, raw_interval
            )
        })?;

        if interval <= 0 {
            bail!(
                "{} must be a positive integer, got {}",
                INTERVAL_VAR,
                interval
            );
        }

        let config = Self {
            system_ip,
            target_url,
            interval_minutes: interval as u64,
        };
        config.validate()?;
        Ok(config)
    }

    /// URL the system info is fetched from
    pub fn source_url(&self) -> String {
        relay_client::source_url_for(&self.system_ip)
    }

    /// Sleep between cycles
    pub fn interval(&self) -> Duration {
        // validate() rejects values that would overflow
        Duration::from_secs(self.interval_minutes.saturating_mul(60))
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.system_ip.is_empty() {
            bail!("system_ip cannot be empty");
        }

        if self.target_url.is_empty() {
            bail!("target_url cannot be empty");
        }

        if self.interval_minutes == 0 {
            bail!("interval must be greater than 0");
        }

        if self.interval_minutes.checked_mul(60).is_none() {
            bail!("interval of {} minutes is too large", self.interval_minutes);
        }

        Ok(())
    }
}
