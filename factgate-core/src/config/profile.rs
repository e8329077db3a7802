//! Profile configuration
//!
//! The static user rendered into every `/me` envelope.

use crate::model::User;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Profile configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Env: FG_PROFILE_NAME
    pub name: String,

    /// Env: FG_PROFILE_EMAIL
    pub email: String,

    /// Env: FG_PROFILE_STACK
    pub stack: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "Tobi Ade".to_string(),
            email: "tobi@example.com".to_string(),
            stack: "rust, ts, postgres".to_string(),
        }
    }
}

impl ProfileConfig {
    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.name = other.name;
        self.email = other.email;
        self.stack = other.stack;
    }

    /// Apply environment variables
    pub fn apply_env_vars(&mut self) {
        if let Ok(name) = env::var("FG_PROFILE_NAME") {
            self.name = name;
        }

        if let Ok(email) = env::var("FG_PROFILE_EMAIL") {
            self.email = email;
        }

        if let Ok(stack) = env::var("FG_PROFILE_STACK") {
            self.stack = stack;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            bail!("Invalid profile: name cannot be empty");
        }
        Ok(())
    }

    pub fn to_user(&self) -> User {
        User { name: self.name.clone(), email: self.email.clone(), stack: self.stack.clone() }
    }
}
