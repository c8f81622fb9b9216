//! Configuration module for the live feed

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LiveError, LiveResult};

pub const DEFAULT_STALE_THRESHOLD_SECONDS: f64 = 10.0;
pub const DEFAULT_HIGHLIGHT_DURATION_SECONDS: f64 = 0.6;

/// Timing constants consumed by the reconciliation engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Samples older than this, relative to evaluation time, are stale
    pub stale_threshold_seconds: f64,
    /// How long a change highlight stays active after the change
    pub highlight_duration_seconds: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stale_threshold_seconds: DEFAULT_STALE_THRESHOLD_SECONDS,
            highlight_duration_seconds: DEFAULT_HIGHLIGHT_DURATION_SECONDS,
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Arby-X API server
    pub api_url: String,
    /// Poll interval for the live endpoint
    pub poll_interval_ms: u64,
    /// Staleness threshold in seconds
    pub stale_threshold_seconds: f64,
    /// Highlight duration in seconds
    pub highlight_duration_seconds: f64,
    /// Per-request HTTP timeout
    pub http_timeout_ms: u64,
    /// Log level
    pub log_level: String,
}

fn parsed_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: env::var("ARBY_API_URL").unwrap_or(defaults.api_url),
            poll_interval_ms: parsed_or("POLL_INTERVAL_MS", defaults.poll_interval_ms),
            stale_threshold_seconds: parsed_or(
                "STALE_THRESHOLD_SECONDS",
                defaults.stale_threshold_seconds,
            ),
            highlight_duration_seconds: parsed_or(
                "HIGHLIGHT_DURATION_SECONDS",
                defaults.highlight_duration_seconds,
            ),
            http_timeout_ms: parsed_or("HTTP_TIMEOUT_MS", defaults.http_timeout_ms),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// Reject timing values the engine cannot work with
    pub fn validate(&self) -> LiveResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.stale_threshold_seconds) {
            return Err(LiveError::Config(format!(
                "stale threshold must be a positive number of seconds, got {}",
                self.stale_threshold_seconds
            )));
        }
        if !positive(self.highlight_duration_seconds) {
            return Err(LiveError::Config(format!(
                "highlight duration must be a positive number of seconds, got {}",
                self.highlight_duration_seconds
            )));
        }
        if self.poll_interval_ms == 0 {
            return Err(LiveError::Config("poll interval must be non-zero".to_string()));
        }
        Ok(())
    }

    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            stale_threshold_seconds: self.stale_threshold_seconds,
            highlight_duration_seconds: self.highlight_duration_seconds,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            poll_interval_ms: 3000,
            stale_threshold_seconds: DEFAULT_STALE_THRESHOLD_SECONDS,
            highlight_duration_seconds: DEFAULT_HIGHLIGHT_DURATION_SECONDS,
            http_timeout_ms: 2000,
            log_level: "info".to_string(),
        }
    }
}
