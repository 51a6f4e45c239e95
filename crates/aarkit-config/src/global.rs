//! Global Configuration (~/.aarkit/config.toml)
//!
//! Machine-wide defaults for platform archives and tool locations, so a
//! project's aarkit.toml can stay free of SDK paths.

use crate::project::{PlatformConfig, ToolsConfig};
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global user configuration from ~/.aarkit/config.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    /// Default platform archives
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformConfig>,

    /// Default tool locations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsConfig>,
}

impl GlobalConfig {
    /// Load global configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })
    }

    /// Path of the global configuration file
    pub fn global_config_path() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".aarkit").join("config.toml"))
    }

    /// Default bootstrap jar, if configured
    pub fn bootstrap_jar(&self) -> Option<&Path> {
        self.platform
            .as_ref()
            .and_then(|p| p.bootstrap_jar.as_deref())
    }

    /// Default lambda stubs jar, if configured
    pub fn lambda_stubs_jar(&self) -> Option<&Path> {
        self.platform
            .as_ref()
            .and_then(|p| p.lambda_stubs_jar.as_deref())
    }
}
