//! aarkit Configuration System
//!
//! Provides configuration management for aarkit projects including:
//! - Project configuration (aarkit.toml)
//! - Global user configuration (~/.aarkit/config.toml)
//! - Resolution of the effective per-run module settings
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded and merged in the following order (later overrides earlier):
//! 1. Global config (~/.aarkit/config.toml)
//! 2. Project config (./aarkit.toml)
//! 3. Environment variables (AARKIT_*)
//! 4. CLI flags
//!
//! # Example
//!
//! ```no_run
//! use aarkit_config::ConfigLoader;
//! use std::path::Path;
//!
//! let mut loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! let settings = config.module_settings().unwrap();
//! println!("include = {}", settings.include);
//! ```

pub mod global;
pub mod loader;
pub mod project;
pub mod settings;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Missing required setting '{field}' (set it in aarkit.toml or via {env})")]
    MissingField { field: String, env: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// File name of the project configuration
pub const PROJECT_CONFIG_FILE: &str = "aarkit.toml";

// Re-export main types
pub use global::GlobalConfig;
pub use loader::{Config, ConfigLoader};
pub use project::ProjectConfig;
pub use settings::{ModuleSettings, ToolPaths};
