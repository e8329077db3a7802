//! Configuration system for Factgate
//!
//! Small, layered configuration with a clear supersedence hierarchy:
//!
//! 1. **Environment variables** (`FG_*`) - highest priority
//! 2. **Config file** (`factgate.toml`)
//! 3. **Defaults** - lowest priority
//!
//! Every tunable the access layer cares about lives here: the freshness
//! window, the rate budget, the upstream address and timeout, and the
//! profile rendered into the response envelope.

pub mod cache;
pub mod profile;
pub mod rate_limit;
pub mod server;
pub mod upstream;

pub use cache::CacheConfig;
pub use profile::ProfileConfig;
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete Factgate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FactgateConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub cache: CacheConfig,
    pub rate_limit: RateLimitConfig,
    pub profile: ProfileConfig,
}

impl Default for FactgateConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            cache: CacheConfig::default(),
            rate_limit: RateLimitConfig::default(),
            profile: ProfileConfig::default(),
        }
    }
}

impl FactgateConfig {
    /// Load configuration with the full supersedence chain.
    pub fn load() -> Result<Self> {
        Self::load_from("factgate.toml")
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut config = Self::default();

        if path.exists() {
            let file_config = Self::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.merge(file_config);
        }

        config.apply_env_vars();

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.as_ref().display()))
    }

    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.server.merge(other.server);
        self.upstream.merge(other.upstream);
        self.cache.merge(other.cache);
        self.rate_limit.merge(other.rate_limit);
        self.profile.merge(other.profile);
    }

    /// Apply environment variables to configuration
    pub fn apply_env_vars(&mut self) {
        self.server.apply_env_vars();
        self.upstream.apply_env_vars();
        self.cache.apply_env_vars();
        self.rate_limit.apply_env_vars();
        self.profile.apply_env_vars();
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.upstream.validate()?;
        self.cache.validate()?;
        self.rate_limit.validate()?;
        self.profile.validate()?;
        Ok(())
    }
}
