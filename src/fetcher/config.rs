use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for post-info enrichment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Maximum fetches in flight (default: 10)
    pub concurrency: usize,

    /// Per-attempt timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// Attempts per record, including the first (default: 3)
    pub max_attempts: u32,

    /// Delay before the first retry in milliseconds (default: 1000)
    pub initial_backoff_ms: u64,

    /// Upper bound for retry delays in milliseconds (default: 10000)
    pub max_backoff_ms: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            concurrency: 10,
            timeout_secs: 30,
            max_attempts: 3,
            initial_backoff_ms: 1000,
            max_backoff_ms: 10_000,
        }
    }
}

impl EnrichmentConfig {
    /// Get the per-attempt timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }

    /// Delay before retry number `retry` (1-based): doubles each time, capped.
    pub fn backoff_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.initial_backoff()
            .saturating_mul(factor)
            .min(self.max_backoff())
    }

    /// One request at a time, for sources that throttle aggressively.
    pub fn sequential() -> Self {
        Self {
            concurrency: 1,
            ..Default::default()
        }
    }
}

/// Configuration for the page loader
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Site pages are read from (default: "https://old.reddit.com")
    pub base_url: String,

    /// User agent string to use
    pub user_agent: Option<String>,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://old.reddit.com".to_string(),
            user_agent: Some(format!("readit/{}", env!("CARGO_PKG_VERSION"))),
            timeout_secs: 30,
        }
    }
}

impl LoaderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
