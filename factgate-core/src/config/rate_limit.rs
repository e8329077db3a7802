//! Admission controller configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Token-bucket admission configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Bucket capacity: maximum burst of upstream calls
    /// Env: FG_RATE_CAPACITY
    /// Default: 2
    pub capacity: u32,

    /// Tokens refilled per second
    /// Env: FG_RATE_REFILL
    /// Default: 0.5
    pub refill_per_sec: f64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self { capacity: 2, refill_per_sec: 0.5 }
    }
}

impl RateLimitConfig {
    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.capacity = other.capacity;
        self.refill_per_sec = other.refill_per_sec;
    }

    /// Apply environment variables
    pub fn apply_env_vars(&mut self) {
        if let Ok(capacity) = env::var("FG_RATE_CAPACITY") {
            if let Ok(c) = capacity.parse() {
                self.capacity = c;
            }
        }

        if let Ok(refill) = env::var("FG_RATE_REFILL") {
            if let Ok(r) = refill.parse() {
                self.refill_per_sec = r;
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            bail!("Invalid rate limit capacity: must be at least 1");
        }

        if !(self.refill_per_sec > 0.0) || !self.refill_per_sec.is_finite() {
            bail!("Invalid rate limit refill: must be a positive number of tokens per second");
        }

        Ok(())
    }
}
