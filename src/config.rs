//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Shortest accepted sweep interval in seconds.
pub const MIN_SWEEP_INTERVAL: u64 = 1;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// TTL in milliseconds for entries written without an explicit TTL
    pub default_ttl_ms: u64,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the REST backend serving content
    pub upstream_url: String,
    /// Upstream request timeout in seconds
    pub upstream_timeout: u64,
    /// Optional JSON file of demo content served when the backend is down
    pub fallback_content: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `SWEEP_INTERVAL` - Expired entry sweep frequency in seconds (default: 60, minimum: 1)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `UPSTREAM_URL` - Content backend base URL (default: http://localhost:8000/api)
    /// - `UPSTREAM_TIMEOUT` - Upstream request timeout in seconds (default: 10)
    /// - `FALLBACK_CONTENT` - Path to a demo content JSON file (default: unset)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl_ms: parse_var("DEFAULT_TTL_MS").unwrap_or(defaults.default_ttl_ms),
            sweep_interval: parse_var::<u64>("SWEEP_INTERVAL")
                .unwrap_or(defaults.sweep_interval)
                .max(MIN_SWEEP_INTERVAL),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            upstream_url: env::var("UPSTREAM_URL").unwrap_or(defaults.upstream_url),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT").unwrap_or(defaults.upstream_timeout),
            fallback_content: env::var("FALLBACK_CONTENT")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_millis(self.default_ttl_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval.max(MIN_SWEEP_INTERVAL))
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl_ms: 5 * 60 * 1000,
            sweep_interval: 60,
            server_port: 3000,
            upstream_url: "http://localhost:8000/api".to_string(),
            upstream_timeout: 10,
            fallback_content: None,
        }
    }
}
