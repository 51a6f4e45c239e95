//! Project Configuration (aarkit.toml)
//!
//! Handles project-level configuration stored in `aarkit.toml` at the project root.
//! The project root is the directory that contains every library module listed
//! in `assemble.include`.

use crate::settings::{DEFAULT_MIN_SDK, DEFAULT_TARGET_SDK};
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project configuration from aarkit.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Module assembly settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assemble: Option<AssembleConfig>,

    /// Platform archives
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformConfig>,

    /// External tool locations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsConfig>,
}

/// Module assembly settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct AssembleConfig {
    /// Bracketed, comma-separated module list (e.g. "[core, ui]")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,

    /// Minimum SDK level passed to the resource linker (default: 21)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_sdk: Option<u32>,

    /// Target SDK level passed to the resource linker (default: 31)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_sdk: Option<u32>,

    /// Java source/target level (default: "1.8")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_version: Option<String>,
}

/// Platform bootstrap archives
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PlatformConfig {
    /// Platform bootstrap jar (android.jar)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bootstrap_jar: Option<PathBuf>,

    /// Lambda desugaring stubs jar (core-lambda-stubs.jar)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lambda_stubs_jar: Option<PathBuf>,
}

/// External tool executables
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    /// Resource compiler/linker executable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aapt2: Option<PathBuf>,

    /// Java compiler executable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javac: Option<PathBuf>,
}

impl ProjectConfig {
    /// Load project configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the project configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(assemble) = &self.assemble {
            assemble.validate()?;
        }
        Ok(())
    }

    /// Raw include list, if configured
    pub fn include(&self) -> Option<&str> {
        self.assemble.as_ref().and_then(|a| a.include.as_deref())
    }

    /// Mutable access to the assemble section, creating it if absent
    pub fn assemble_mut(&mut self) -> &mut AssembleConfig {
        self.assemble.get_or_insert_with(AssembleConfig::default)
    }

    /// Mutable access to the platform section, creating it if absent
    pub fn platform_mut(&mut self) -> &mut PlatformConfig {
        self.platform.get_or_insert_with(PlatformConfig::default)
    }

    /// Mutable access to the tools section, creating it if absent
    pub fn tools_mut(&mut self) -> &mut ToolsConfig {
        self.tools.get_or_insert_with(ToolsConfig::default)
    }
}

impl AssembleConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.min_sdk == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "assemble.min-sdk".to_string(),
                reason: "SDK level must be positive".to_string(),
            });
        }
        if self.target_sdk == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "assemble.target-sdk".to_string(),
                reason: "SDK level must be positive".to_string(),
            });
        }
        // Compare resolved levels, defaults included.
        let min = self.min_sdk.unwrap_or(DEFAULT_MIN_SDK);
        let target = self.target_sdk.unwrap_or(DEFAULT_TARGET_SDK);
        if target < min {
            return Err(ConfigError::InvalidValue {
                field: "assemble.target-sdk".to_string(),
                reason: format!("target-sdk {} is lower than min-sdk {}", target, min),
            });
        }
        if let Some(version) = &self.java_version {
            if version.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "assemble.java-version".to_string(),
                    reason: "java version cannot be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}
