//! Configuration schema definitions.
//!
//! Flat key layout matching the JSON config files deployed alongside the
//! gateway. Every field has a default; a partial or absent file is fine.

use crate::transport::PortSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gateway configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Serial device connected to the modem.
    pub serial_port: String,
    /// Port for the HTTP server.
    pub http_port: u16,
    /// Baud rate for the modem link.
    pub baud_rate: u32,
    /// Ceiling on how long a single serial read may block, in
    /// milliseconds. Response deadlines are honored to within roughly
    /// this window.
    pub read_timeout_ms: u64,
    /// Log level used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serial_port: "/dev/mhi_DUN".to_string(),
            http_port: 5643,
            baud_rate: 115_200,
            read_timeout_ms: 100,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Get the per-read ceiling as a Duration.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Settings for opening the serial transport.
    pub fn port_settings(&self) -> PortSettings {
        PortSettings {
            baud_rate: self.baud_rate,
            read_timeout: self.read_timeout(),
        }
    }
}
