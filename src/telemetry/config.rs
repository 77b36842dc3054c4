//! Telemetry destination and pacing configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the telemetry loop.
///
/// All values are fixed at process start; there is no runtime
/// reconfiguration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Collector host to send frames to
    pub host: String,
    /// Collector UDP port
    pub port: u16,
    /// Update period in milliseconds
    pub interval_ms: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: crate::DEFAULT_PORT,
            interval_ms: crate::DEFAULT_INTERVAL_MS,
        }
    }
}

impl TelemetryConfig {
    /// Create a new configuration with custom host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set the destination host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the destination port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the update period in milliseconds.
    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Get the full destination address.
    pub fn destination(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
