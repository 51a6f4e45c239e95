//! CLI configuration via environment variables
//!
//! Project settings live in aarkit.toml; these only affect presentation.

use std::env;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Disable colored output (AARKIT_NO_COLOR=1 or NO_COLOR=1)
    pub no_color: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            no_color: env::var("AARKIT_NO_COLOR").is_ok() || env::var("NO_COLOR").is_ok(),
        }
    }

    /// Apply process-wide output settings
    pub fn apply(&self) {
        if self.no_color {
            colored::control::set_override(false);
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
