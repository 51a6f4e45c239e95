//! Results of an assembly run
use crate::diagnostic::{Diagnostic, DiagnosticLevel};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Why a configured module was not built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// `src/main/res` does not exist
    MissingResources,
    /// `src/main/AndroidManifest.xml` does not exist
    MissingManifest,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingResources => write!(f, "no src/main/res directory"),
            Self::MissingManifest => write!(f, "no src/main/AndroidManifest.xml"),
        }
    }
}

/// What happened to one module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleStatus {
    Assembled,
    Skipped(SkipReason),
}

/// Per-module outcome
#[derive(Debug, Clone)]
pub struct ModuleReport {
    /// Module name
    pub name: String,
    /// Assembled or skipped
    pub status: ModuleStatus,
    /// Steps that ran, in order
    pub steps: Vec<&'static str>,
    /// Warnings and notes collected from the steps
    pub diagnostics: Vec<Diagnostic>,
    /// Wall time spent on this module
    pub elapsed: Duration,
}

impl ModuleReport {
    pub fn skipped(name: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            name: name.into(),
            status: ModuleStatus::Skipped(reason),
            steps: Vec::new(),
            diagnostics: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn is_assembled(&self) -> bool {
        self.status == ModuleStatus::Assembled
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
            .count()
    }
}

/// Build statistics
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Names in the include list, duplicates included
    pub total_modules: usize,
    /// Modules that went through the pipeline
    pub assembled_modules: usize,
    /// Modules filtered out by the inclusion check
    pub skipped_modules: usize,
    /// Total run time
    pub total_time: Duration,
}

/// Result of a successful assembly run
#[derive(Debug, Clone, Default)]
pub struct AssembleReport {
    /// One entry per include-list name, in list order
    pub modules: Vec<ModuleReport>,
    /// Aggregate statistics
    pub stats: BuildStats,
}

impl AssembleReport {
    pub(crate) fn new(modules: Vec<ModuleReport>, total_time: Duration) -> Self {
        let assembled_modules = modules.iter().filter(|m| m.is_assembled()).count();
        let stats = BuildStats {
            total_modules: modules.len(),
            assembled_modules,
            skipped_modules: modules.len() - assembled_modules,
            total_time,
        };
        Self { modules, stats }
    }

    /// Names of assembled modules in processing order
    pub fn assembled(&self) -> impl Iterator<Item = &str> {
        self.modules
            .iter()
            .filter(|m| m.is_assembled())
            .map(|m| m.name.as_str())
    }

    /// Every diagnostic collected across modules
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.modules.iter().flat_map(|m| m.diagnostics.iter())
    }
}
