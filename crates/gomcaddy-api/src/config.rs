//! # Client Configuration
//!
//! Connection and polling settings for the backend gateway.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`GOMCADDY_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after initialization, so no locking is
//! needed; construct it once at startup and share references.

use std::time::Duration;

/// How often an open order-detail view refreshes.
pub const ORDER_DETAIL_POLL: Duration = Duration::from_secs(5);

/// How often the order list and the operator dashboard refresh.
pub const ORDER_LIST_POLL: Duration = Duration::from_secs(10);

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend API, including the `/api` prefix.
    pub base_url: String,

    /// Per-request timeout.
    pub request_timeout: Duration,

    /// Poll interval for a single order's detail view.
    pub order_poll_interval: Duration,

    /// Poll interval for order lists (customer and operator).
    pub orders_poll_interval: Duration,
}

impl Default for ClientConfig {
    /// Returns defaults suitable for local development.
    fn default() -> Self {
        ClientConfig {
            base_url: "http://localhost:8000/api".to_string(),
            request_timeout: Duration::from_secs(30),
            order_poll_interval: ORDER_DETAIL_POLL,
            orders_poll_interval: ORDER_LIST_POLL,
        }
    }
}

impl ClientConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `GOMCADDY_API_URL`: Override the backend base URL
    /// - `GOMCADDY_REQUEST_TIMEOUT_SECS`: Override the request timeout
    pub fn from_env() -> Self {
        let mut config = ClientConfig::default();

        if let Ok(base_url) = std::env::var("GOMCADDY_API_URL") {
            config.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("GOMCADDY_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse::<u64>() {
                config.request_timeout = Duration::from_secs(secs);
            }
        }

        config
    }

    /// Base URL with any trailing slash removed, ready for joining paths.
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
