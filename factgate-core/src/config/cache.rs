//! Fact cache configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Fact cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Freshness window in seconds: maximum age at which a cached fact is
    /// served without a new upstream call
    /// Env: FG_CACHE_FRESHNESS
    /// Default: 60
    pub freshness_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { freshness_secs: 60 }
    }
}

impl CacheConfig {
    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.freshness_secs = other.freshness_secs;
    }

    /// Apply environment variables
    pub fn apply_env_vars(&mut self) {
        if let Ok(secs) = env::var("FG_CACHE_FRESHNESS") {
            if let Ok(s) = secs.parse() {
                self.freshness_secs = s;
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.freshness_secs == 0 {
            bail!("Invalid cache freshness: must be greater than 0");
        }
        Ok(())
    }

    pub fn freshness(&self) -> Duration {
        Duration::from_secs(self.freshness_secs)
    }
}
