//! Application configuration loaded from environment variables.

use std::time::Duration;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `CART_SERVICE_URL` — base URL of the cart service
///   (default: `"http://localhost:8080"`)
/// - `CART_FETCH_TIMEOUT_MS` — cart fetch deadline in milliseconds
///   (default: `5000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cart_service_url: String,
    pub cart_fetch_timeout_ms: u64,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            cart_service_url: std::env::var("CART_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            cart_fetch_timeout_ms: std::env::var("CART_FETCH_TIMEOUT_MS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(5000),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the cart fetch deadline as a duration.
    pub fn cart_fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.cart_fetch_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cart_service_url: "http://localhost:8080".to_string(),
            cart_fetch_timeout_ms: 5000,
            log_level: "info".to_string(),
        }
    }
}
