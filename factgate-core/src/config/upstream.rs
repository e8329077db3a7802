//! Upstream provider configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Upstream provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Fact provider URL
    /// Env: FG_UPSTREAM_URL
    /// Default: "https://catfact.ninja/fact"
    pub url: String,

    /// Request timeout in seconds; the only bound on an in-flight call
    /// Env: FG_UPSTREAM_TIMEOUT
    /// Default: 10
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self { url: "https://catfact.ninja/fact".to_string(), timeout_secs: 10 }
    }
}

impl UpstreamConfig {
    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.url = other.url;
        self.timeout_secs = other.timeout_secs;
    }

    /// Apply environment variables
    pub fn apply_env_vars(&mut self) {
        if let Ok(url) = env::var("FG_UPSTREAM_URL") {
            self.url = url;
        }

        if let Ok(timeout) = env::var("FG_UPSTREAM_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.timeout_secs = t;
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Invalid upstream url: cannot be empty");
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            bail!("Invalid upstream url: must be http(s), got {}", self.url);
        }

        if self.timeout_secs == 0 {
            bail!("Invalid upstream timeout: must be greater than 0");
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
