//! Per-module build steps
//!
//! Each step is one external tool invocation plus the file preparation it
//! needs. Steps are independent values behind [`BuildStep`]; the assembler
//! runs them in order and stops at the first one that does not succeed.

mod java_compile;
mod resource_compile;
mod resource_link;

pub use java_compile::{discover_java_sources, JavaCompileStep};
pub use resource_compile::ResourceCompileStep;
pub use resource_link::ResourceLinkStep;

use crate::diagnostic::CompilationResult;
use crate::error::{BuildError, BuildResult};
use crate::layout::BuildLayout;
use crate::tools::{JavaCompiler, ResourceTool};
use aarkit_config::ModuleSettings;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Inputs shared by every step of one module
#[derive(Debug, Clone, Copy)]
pub struct ModuleContext<'a> {
    /// Paths of the module being built
    pub layout: &'a BuildLayout,
    /// Run-wide settings (SDK levels, platform archives)
    pub settings: &'a ModuleSettings,
}

impl<'a> ModuleContext<'a> {
    pub fn new(layout: &'a BuildLayout, settings: &'a ModuleSettings) -> Self {
        Self { layout, settings }
    }

    /// Module name
    pub fn name(&self) -> &str {
        &self.layout.name
    }
}

/// One stage of the per-module pipeline
pub trait BuildStep {
    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    /// Whether this step has anything to do for the module
    fn applies(&self, _ctx: &ModuleContext<'_>) -> bool {
        true
    }

    /// Run the step. I/O problems are `Err`; tool failures come back as an
    /// unsuccessful [`CompilationResult`] so their diagnostics are kept.
    fn run(&self, ctx: &ModuleContext<'_>) -> BuildResult<CompilationResult>;
}

/// compile, link, then Java compile
pub fn default_steps(
    resources: Arc<dyn ResourceTool>,
    java: Arc<dyn JavaCompiler>,
) -> Vec<Box<dyn BuildStep>> {
    vec![
        Box::new(ResourceCompileStep::new(Arc::clone(&resources))),
        Box::new(ResourceLinkStep::new(resources)),
        Box::new(JavaCompileStep::new(java)),
    ]
}

/// Create a directory and its parents
pub(crate) fn ensure_dir(path: &Path) -> BuildResult<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| BuildError::io(path, e))?;
    }
    Ok(())
}

/// Return `parent/name`, creating the parent and an empty file if needed
pub(crate) fn create_new_file(parent: &Path, name: &str) -> BuildResult<PathBuf> {
    ensure_dir(parent)?;
    let path = parent.join(name);
    if !path.exists() {
        fs::File::create(&path).map_err(|e| BuildError::io(&path, e))?;
    }
    Ok(path)
}
