//! Gateway configuration.

use std::time::Duration;

use common::{env_or, env_parse};

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Deadline for a single request, in seconds
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after a shutdown signal
    pub shutdown_grace_secs: u64,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env_or("SERVER_HOST", &defaults.host),
            port: env_parse("SERVER_PORT")
                .or_else(|| env_parse("PORT"))
                .unwrap_or(defaults.port),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout_secs),
            shutdown_grace_secs: env_parse("SHUTDOWN_GRACE_SECS")
                .unwrap_or(defaults.shutdown_grace_secs),
        }
    }

    /// `host:port` string suitable for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
            shutdown_grace_secs: 10,
        }
    }
}
