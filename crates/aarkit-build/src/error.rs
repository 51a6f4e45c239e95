//! Build pipeline error types
use crate::diagnostic::Diagnostic;
use aarkit_config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

pub type BuildResult<T> = Result<T, BuildError>;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("I/O error at {path}: {error}")]
    IoError {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("Missing input for module '{module}': {path}")]
    MissingInput { module: String, path: PathBuf },

    #[error("Unable to launch {tool}: {error}")]
    ToolUnavailable {
        tool: String,
        error: std::io::Error,
    },

    #[error("{step} failed for module '{module}': compilation failed, check logs for more details")]
    StepFailed {
        module: String,
        step: String,
        diagnostics: Vec<Diagnostic>,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl BuildError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            error,
        }
    }

    /// Create a missing input error
    pub fn missing_input(module: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MissingInput {
            module: module.into(),
            path: path.into(),
        }
    }

    /// Create a tool launch error
    pub fn tool_unavailable(tool: impl Into<String>, error: std::io::Error) -> Self {
        Self::ToolUnavailable {
            tool: tool.into(),
            error,
        }
    }

    /// Create a step failure carrying the diagnostics that caused it
    pub fn step_failed(
        module: impl Into<String>,
        step: impl Into<String>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self::StepFailed {
            module: module.into(),
            step: step.into(),
            diagnostics,
        }
    }

    /// Diagnostics attached to this error, if any
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::StepFailed { diagnostics, .. } => diagnostics,
            _ => &[],
        }
    }
}
