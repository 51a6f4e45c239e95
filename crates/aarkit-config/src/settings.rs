//! Resolved settings handed to the build pipeline
//!
//! These are plain values: every optional field from the configuration files
//! has been merged and defaulted, and every path is absolute or relative to
//! the working directory of the caller.

use std::path::PathBuf;

/// Default include list when none is configured
pub const DEFAULT_INCLUDE: &str = "[]";
/// Default minimum SDK level
pub const DEFAULT_MIN_SDK: u32 = 21;
/// Default target SDK level
pub const DEFAULT_TARGET_SDK: u32 = 31;
/// Default Java source/target level
pub const DEFAULT_JAVA_VERSION: &str = "1.8";

/// Effective settings for one assembly run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSettings {
    /// Raw include list, e.g. "[core, ui]"
    pub include: String,
    /// Minimum SDK level
    pub min_sdk: u32,
    /// Target SDK level
    pub target_sdk: u32,
    /// Java source/target level
    pub java_version: String,
    /// Platform bootstrap jar
    pub bootstrap_jar: PathBuf,
    /// Lambda desugaring stubs jar
    pub lambda_stubs_jar: PathBuf,
}

impl ModuleSettings {
    /// Settings with default levels and the given platform archives
    pub fn new(bootstrap_jar: impl Into<PathBuf>, lambda_stubs_jar: impl Into<PathBuf>) -> Self {
        Self {
            include: DEFAULT_INCLUDE.to_string(),
            min_sdk: DEFAULT_MIN_SDK,
            target_sdk: DEFAULT_TARGET_SDK,
            java_version: DEFAULT_JAVA_VERSION.to_string(),
            bootstrap_jar: bootstrap_jar.into(),
            lambda_stubs_jar: lambda_stubs_jar.into(),
        }
    }

    /// Set the include list
    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.include = include.into();
        self
    }

    /// Set min and target SDK levels
    pub fn with_sdk(mut self, min_sdk: u32, target_sdk: u32) -> Self {
        self.min_sdk = min_sdk;
        self.target_sdk = target_sdk;
        self
    }
}

/// Executables for the external tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    /// Resource compiler/linker
    pub aapt2: PathBuf,
    /// Java compiler
    pub javac: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            aapt2: PathBuf::from("aapt2"),
            javac: PathBuf::from("javac"),
        }
    }
}
