// ── Runtime engine configuration ──
//
// Describes *where* to poll and *how often*. Never touches disk; the
// config crate or the CLI builds an `EngineConfig` and hands it in.

use std::time::Duration;

use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1/bridget/v1.0";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_SERVICE: &str = "bridget";

/// Configuration for one engine instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Service root, including the version prefix.
    pub base_url: Url,
    /// Tick period shared by every resource type.
    pub poll_interval: Duration,
    /// Fixed per-request timeout.
    pub timeout: Duration,
    /// Service tag stamped on failure notifications.
    pub service: String,
}

impl EngineConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: bridgewatch_api::DEFAULT_TIMEOUT,
            service: DEFAULT_SERVICE.into(),
        }
    }
}
