//! Configuration Loader
//!
//! Handles loading and merging configuration from multiple sources with proper precedence.

use crate::global::GlobalConfig;
use crate::project::ProjectConfig;
use crate::settings::{
    ModuleSettings, ToolPaths, DEFAULT_INCLUDE, DEFAULT_JAVA_VERSION, DEFAULT_MIN_SDK,
    DEFAULT_TARGET_SDK,
};
use crate::{ConfigError, ConfigResult, PROJECT_CONFIG_FILE};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader
///
/// Loads configuration from multiple sources and merges them with proper precedence:
/// 1. Global config (~/.aarkit/config.toml) - lowest priority
/// 2. Project config (./aarkit.toml) - overrides global
/// 3. Environment variables (AARKIT_*) - overrides project
/// 4. CLI flags - highest priority (handled by caller)
pub struct ConfigLoader {
    /// Cached global config path
    global_config_path: Option<PathBuf>,
}

/// Merged configuration result
#[derive(Debug, Clone)]
pub struct Config {
    /// Project configuration
    pub project: ProjectConfig,

    /// Global configuration
    pub global: GlobalConfig,

    /// Project root directory (where aarkit.toml was found)
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Use an explicit global config file instead of ~/.aarkit/config.toml
    pub fn with_global_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find aarkit.toml, then loads and merges
    /// global config if it exists.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project_config) = self.find_project_config(start_dir)?;

        let global_config = self.load_global_config()?;

        let project_config = self.apply_env_overrides(project_config)?;

        Ok(Config {
            project: project_config,
            global: global_config,
            project_root,
        })
    }

    /// Load configuration from a specific project config file
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        let project_config = ProjectConfig::load_from_file(config_path)?;
        let global_config = self.load_global_config()?;
        let project_config = self.apply_env_overrides(project_config)?;

        let project_root = config_path.parent().map(|p| p.to_path_buf());

        Ok(Config {
            project: project_config,
            global: global_config,
            project_root,
        })
    }

    /// Find project configuration by walking up directory tree
    fn find_project_config(
        &self,
        start_dir: &Path,
    ) -> ConfigResult<(Option<PathBuf>, ProjectConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(PROJECT_CONFIG_FILE);

            if config_path.exists() {
                let project_config = ProjectConfig::load_from_file(&config_path)?;
                return Ok((Some(current), project_config));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok((None, ProjectConfig::default())),
            }
        }
    }

    /// Load global configuration, defaulting when the file is absent
    fn load_global_config(&mut self) -> ConfigResult<GlobalConfig> {
        let path = match &self.global_config_path {
            Some(path) => path.clone(),
            None => match GlobalConfig::global_config_path() {
                Ok(path) => {
                    self.global_config_path = Some(path.clone());
                    path
                }
                Err(ConfigError::HomeNotFound) => return Ok(GlobalConfig::default()),
                Err(e) => return Err(e),
            },
        };

        if !path.exists() {
            return Ok(GlobalConfig::default());
        }

        GlobalConfig::load_from_file(&path)
    }

    /// Apply environment variable overrides to project config
    ///
    /// Recognised variables: AARKIT_INCLUDE, AARKIT_MIN_SDK, AARKIT_TARGET_SDK,
    /// AARKIT_BOOTSTRAP_JAR, AARKIT_LAMBDA_STUBS_JAR, AARKIT_AAPT2, AARKIT_JAVAC.
    fn apply_env_overrides(&self, mut config: ProjectConfig) -> ConfigResult<ProjectConfig> {
        if let Ok(include) = env::var("AARKIT_INCLUDE") {
            config.assemble_mut().include = Some(include);
        }

        if let Ok(min_sdk) = env::var("AARKIT_MIN_SDK") {
            config.assemble_mut().min_sdk = Some(parse_sdk("AARKIT_MIN_SDK", &min_sdk)?);
        }

        if let Ok(target_sdk) = env::var("AARKIT_TARGET_SDK") {
            config.assemble_mut().target_sdk =
                Some(parse_sdk("AARKIT_TARGET_SDK", &target_sdk)?);
        }

        if let Ok(jar) = env::var("AARKIT_BOOTSTRAP_JAR") {
            config.platform_mut().bootstrap_jar = Some(PathBuf::from(jar));
        }

        if let Ok(jar) = env::var("AARKIT_LAMBDA_STUBS_JAR") {
            config.platform_mut().lambda_stubs_jar = Some(PathBuf::from(jar));
        }

        if let Ok(aapt2) = env::var("AARKIT_AAPT2") {
            config.tools_mut().aapt2 = Some(PathBuf::from(aapt2));
        }

        if let Ok(javac) = env::var("AARKIT_JAVAC") {
            config.tools_mut().javac = Some(PathBuf::from(javac));
        }

        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_sdk(var: &str, value: &str) -> ConfigResult<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|e| ConfigError::InvalidValue {
            field: var.to_string(),
            reason: format!("'{}' is not an SDK level: {}", value, e),
        })
}

impl Config {
    /// Get the project root directory
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if this is a project (has aarkit.toml)
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }

    /// Raw include list (defaults to "[]")
    pub fn include_list(&self) -> &str {
        self.project.include().unwrap_or(DEFAULT_INCLUDE)
    }

    /// Resolve the effective module settings (project > global > defaults)
    pub fn module_settings(&self) -> ConfigResult<ModuleSettings> {
        let assemble = self.project.assemble.clone().unwrap_or_default();
        let platform = self.project.platform.as_ref();

        let bootstrap_jar = platform
            .and_then(|p| p.bootstrap_jar.as_deref())
            .or_else(|| self.global.bootstrap_jar())
            .ok_or_else(|| ConfigError::MissingField {
                field: "platform.bootstrap-jar".to_string(),
                env: "AARKIT_BOOTSTRAP_JAR".to_string(),
            })?;

        let lambda_stubs_jar = platform
            .and_then(|p| p.lambda_stubs_jar.as_deref())
            .or_else(|| self.global.lambda_stubs_jar())
            .ok_or_else(|| ConfigError::MissingField {
                field: "platform.lambda-stubs-jar".to_string(),
                env: "AARKIT_LAMBDA_STUBS_JAR".to_string(),
            })?;

        Ok(ModuleSettings {
            include: self.include_list().to_string(),
            min_sdk: assemble.min_sdk.unwrap_or(DEFAULT_MIN_SDK),
            target_sdk: assemble.target_sdk.unwrap_or(DEFAULT_TARGET_SDK),
            java_version: assemble
                .java_version
                .unwrap_or_else(|| DEFAULT_JAVA_VERSION.to_string()),
            bootstrap_jar: self.resolve(bootstrap_jar),
            lambda_stubs_jar: self.resolve(lambda_stubs_jar),
        })
    }

    /// Resolve tool executables (project > global > PATH lookup names)
    pub fn tool_paths(&self) -> ToolPaths {
        let defaults = ToolPaths::default();
        let project = self.project.tools.as_ref();
        let global = self.global.tools.as_ref();

        let aapt2 = project
            .and_then(|t| t.aapt2.clone())
            .or_else(|| global.and_then(|t| t.aapt2.clone()))
            .unwrap_or(defaults.aapt2);
        let javac = project
            .and_then(|t| t.javac.clone())
            .or_else(|| global.and_then(|t| t.javac.clone()))
            .unwrap_or(defaults.javac);

        ToolPaths { aapt2, javac }
    }

    /// Relative paths are taken relative to the project root
    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.project_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}
