//! Settings for the metrics HTTP listener.

use crate::error::{MetricError, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Where the metrics API listens and which optional behavior is switched on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    /// Allow cross-origin callers (permissive CORS)
    pub enable_cors: bool,
    /// Record host readings every N ms while serving; off when `None`
    pub sample_interval_ms: Option<u64>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: crate::DEFAULT_WEB_PORT,
            enable_cors: true,
            sample_interval_ms: None,
        }
    }
}

impl WebConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_cors(mut self, enable_cors: bool) -> Self {
        self.enable_cors = enable_cors;
        self
    }

    /// Turn host sampling on (`Some(ms)`) or off (`None`). A zero interval is
    /// treated as off.
    pub fn with_sample_interval_ms(mut self, interval_ms: Option<u64>) -> Self {
        self.sample_interval_ms = interval_ms.filter(|ms| *ms > 0);
        self
    }

    /// `host:port` as typed, for log lines.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resolve the listener address; the host must be an IP literal.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address()
            .parse::<SocketAddr>()
            .map_err(|e| MetricError::config_error(format!("Invalid bind address: {}", e)))
    }
}
