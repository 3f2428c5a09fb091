//! Configuration for the bloomd client
//!
//! Everything here is fixed when the client is constructed.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BloomError, Result};

/// Default port the bloomd daemon listens on
pub const DEFAULT_PORT: u16 = 8673;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    // -------------------------------------------------------------------------
    // Endpoint
    // -------------------------------------------------------------------------
    /// Host name or IP address of the daemon
    pub host: String,

    /// TCP port of the daemon
    pub port: u16,

    // -------------------------------------------------------------------------
    // Retry Configuration
    // -------------------------------------------------------------------------
    /// Maximum number of attempts per operation, including the first.
    /// Zero behaves like one.
    pub max_retries: u32,

    /// Fixed delay between a failed attempt and the next one (milliseconds)
    pub backoff_ms: u64,

    // -------------------------------------------------------------------------
    // Transport Configuration
    // -------------------------------------------------------------------------
    /// Connection establishment timeout (milliseconds)
    pub connect_timeout_ms: u64,

    /// Socket read timeout (milliseconds, 0 = none)
    pub read_timeout_ms: u64,

    /// Socket write timeout (milliseconds, 0 = none)
    pub write_timeout_ms: u64,

    /// Disable Nagle's algorithm on the socket
    pub nodelay: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
            max_retries: 5,
            backoff_ms: 1000,
            connect_timeout_ms: 20,
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            nodelay: true,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// `host:port` string used for resolution and logging
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        non_zero_millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        non_zero_millis(self.write_timeout_ms)
    }

    /// Reject settings that can never produce a working connection
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(BloomError::Config("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(BloomError::Config("port must not be 0".to_string()));
        }
        if self.connect_timeout_ms == 0 {
            return Err(BloomError::Config(
                "connect timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn non_zero_millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

/// Builder for ClientConfig
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the daemon host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the daemon port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the maximum number of attempts per operation
    pub fn max_retries(mut self, count: u32) -> Self {
        self.config.max_retries = count;
        self
    }

    /// Set the delay between attempts (in milliseconds)
    pub fn backoff_ms(mut self, ms: u64) -> Self {
        self.config.backoff_ms = ms;
        self
    }

    /// Set the connection establishment timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn nodelay(mut self, enabled: bool) -> Self {
        self.config.nodelay = enabled;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
