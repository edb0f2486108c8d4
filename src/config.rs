//! Configuration for cartlink
//!
//! Centralized configuration with sensible defaults.

use std::time::Duration;

use crate::error::{CartError, Result};

/// Main configuration for a cartlink session
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Link Configuration
    // -------------------------------------------------------------------------
    /// Serial port path (e.g. `/dev/ttyUSB0` or `COM4`)
    pub port: String,

    /// Baud rate of the 8N1 link
    pub baud_rate: u32,

    /// Timeout for a single blocking serial read (only issued once the
    /// requested bytes are already buffered)
    pub read_timeout: Duration,

    // -------------------------------------------------------------------------
    // Watchdog Configuration
    // -------------------------------------------------------------------------
    /// Abort after this long without forward progress
    pub stall_timeout: Duration,

    /// Sleep between two polls of the link's availability counter
    pub poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: String::new(),
            baud_rate: 115_200,
            read_timeout: Duration::from_secs(1),
            stall_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(1),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the settings a serial session needs on top of `build()`
    pub fn validate_serial(&self) -> Result<()> {
        if self.port.trim().is_empty() {
            return Err(CartError::Config("serial port path is empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the serial port path
    pub fn port(mut self, port: impl Into<String>) -> Self {
        self.config.port = port.into();
        self
    }

    /// Set the baud rate
    pub fn baud_rate(mut self, baud_rate: u32) -> Self {
        self.config.baud_rate = baud_rate;
        self
    }

    /// Set the per-read serial timeout
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = timeout;
        self
    }

    /// Set the no-progress timeout of the watchdog
    pub fn stall_timeout(mut self, timeout: Duration) -> Self {
        self.config.stall_timeout = timeout;
        self
    }

    /// Set the watchdog poll interval
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    /// Validate and build the config
    ///
    /// The port is not checked here since in-memory sessions never open one.
    /// Use [`ConfigBuilder::build_serial`] for a serial session.
    pub fn build(self) -> Result<Config> {
        let config = self.config;

        if config.baud_rate == 0 {
            return Err(CartError::Config("baud rate must be non-zero".to_string()));
        }
        if config.stall_timeout.is_zero() {
            return Err(CartError::Config(
                "stall timeout must be non-zero".to_string(),
            ));
        }
        if config.poll_interval > config.stall_timeout {
            return Err(CartError::Config(format!(
                "poll interval ({:?}) exceeds stall timeout ({:?})",
                config.poll_interval, config.stall_timeout
            )));
        }

        Ok(config)
    }

    /// Validate and build the config for a serial session
    ///
    /// Same as `build()`, and additionally rejects an empty port path.
    pub fn build_serial(self) -> Result<Config> {
        let config = self.build()?;
        config.validate_serial()?;
        Ok(config)
    }
}
