//! Module assembly orchestration
//!
//! For every name in the include list, in order: compute the layout, skip the
//! module unless both `src/main/res` and the manifest exist, wipe `build/`,
//! then run the steps. The first failure ends the whole run.
use crate::diagnostic::DiagnosticLevel;
use crate::error::{BuildError, BuildResult};
use crate::include::ModuleNameList;
use crate::layout::BuildLayout;
use crate::report::{AssembleReport, ModuleReport, ModuleStatus, SkipReason};
use crate::steps::{default_steps, BuildStep, ModuleContext};
use crate::tools::{Aapt2Process, JavaCompiler, JavacProcess, ResourceTool};

use aarkit_config::{Config, ModuleSettings};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Inclusion decision for one include-list entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedModule {
    /// Paths of the module
    pub layout: BuildLayout,
    /// `None` when the module will be built
    pub skip: Option<SkipReason>,
}

impl PlannedModule {
    pub fn is_included(&self) -> bool {
        self.skip.is_none()
    }
}

/// Why `layout` would be skipped, if it would
pub fn skip_reason(layout: &BuildLayout) -> Option<SkipReason> {
    if !layout.res.exists() {
        Some(SkipReason::MissingResources)
    } else if !layout.manifest.exists() {
        Some(SkipReason::MissingManifest)
    } else {
        None
    }
}

/// Resolve every include-list entry to a layout and inclusion decision
pub fn plan_modules(project_root: &Path, names: &ModuleNameList) -> Vec<PlannedModule> {
    names
        .iter()
        .map(|name| {
            let layout = BuildLayout::new(project_root, name);
            let skip = skip_reason(&layout);
            PlannedModule { layout, skip }
        })
        .collect()
}

/// Delete `build/` of every included module; returns the removed directories
pub fn clean_modules(project_root: &Path, names: &ModuleNameList) -> BuildResult<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for planned in plan_modules(project_root, names) {
        if planned.is_included() && remove_build_dir(&planned.layout)? {
            removed.push(planned.layout.build);
        }
    }
    Ok(removed)
}

/// Remove a module's build directory. Returns whether anything was removed.
fn remove_build_dir(layout: &BuildLayout) -> BuildResult<bool> {
    if !layout.build.exists() {
        return Ok(false);
    }
    debug!(module = %layout.name, path = %layout.build.display(), "removing build directory");
    fs::remove_dir_all(&layout.build).map_err(|e| BuildError::io(&layout.build, e))?;
    Ok(true)
}

/// Orchestrates resource compile, resource link and Java compile for every
/// configured library module
pub struct ModuleAssembler {
    /// Directory holding the module directories
    project_root: PathBuf,
    /// Run-wide settings
    settings: ModuleSettings,
    /// Steps run for every included module
    steps: Vec<Box<dyn BuildStep>>,
}

impl ModuleAssembler {
    /// Assembler with the standard compile, link, Java steps
    pub fn new(
        project_root: impl Into<PathBuf>,
        settings: ModuleSettings,
        resources: Arc<dyn ResourceTool>,
        java: Arc<dyn JavaCompiler>,
    ) -> Self {
        Self::with_steps(project_root, settings, default_steps(resources, java))
    }

    /// Assembler with a custom step sequence
    pub fn with_steps(
        project_root: impl Into<PathBuf>,
        settings: ModuleSettings,
        steps: Vec<Box<dyn BuildStep>>,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            settings,
            steps,
        }
    }

    /// Assembler driving the aapt2 and javac executables named in `config`
    pub fn from_config(config: &Config, project_root: impl Into<PathBuf>) -> BuildResult<Self> {
        let settings = config.module_settings()?;
        let tools = config.tool_paths();
        Ok(Self::new(
            project_root,
            settings,
            Arc::new(Aapt2Process::new(tools.aapt2)),
            Arc::new(JavacProcess::new(tools.javac)),
        ))
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn settings(&self) -> &ModuleSettings {
        &self.settings
    }

    /// Names of the configured steps, in run order
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Parsed include list
    pub fn module_names(&self) -> ModuleNameList {
        ModuleNameList::parse(&self.settings.include)
    }

    /// Inclusion decision for every include-list entry
    pub fn plan(&self) -> Vec<PlannedModule> {
        plan_modules(&self.project_root, &self.module_names())
    }

    /// Delete the build directories of included modules
    pub fn clean(&self) -> BuildResult<Vec<PathBuf>> {
        clean_modules(&self.project_root, &self.module_names())
    }

    /// Assemble every included module, stopping at the first failure
    pub fn run(&self) -> BuildResult<AssembleReport> {
        let start = Instant::now();
        let names = self.module_names();
        info!(
            root = %self.project_root.display(),
            modules = %names,
            "assembling library modules"
        );

        let mut reports = Vec::with_capacity(names.len());
        for planned in plan_modules(&self.project_root, &names) {
            let report = match planned.skip {
                Some(reason) => {
                    info!(module = %planned.layout.name, %reason, "skipping module");
                    ModuleReport::skipped(planned.layout.name.clone(), reason)
                }
                None => self.assemble_module(&planned.layout)?,
            };
            reports.push(report);
        }

        let report = AssembleReport::new(reports, start.elapsed());
        info!(
            assembled = report.stats.assembled_modules,
            skipped = report.stats.skipped_modules,
            "assembly finished in {:.2}s",
            report.stats.total_time.as_secs_f64()
        );
        Ok(report)
    }

    /// Run the full pipeline for one included module
    fn assemble_module(&self, layout: &BuildLayout) -> BuildResult<ModuleReport> {
        let start = Instant::now();
        info!(module = %layout.name, "assembling module");

        remove_build_dir(layout)?;

        let ctx = ModuleContext::new(layout, &self.settings);
        let mut executed = Vec::new();
        let mut diagnostics = Vec::new();

        for step in &self.steps {
            if !step.applies(&ctx) {
                debug!(module = %layout.name, step = step.name(), "step not applicable");
                continue;
            }

            debug!(module = %layout.name, step = step.name(), "running step");
            let result = step.run(&ctx)?;

            if !result.success {
                error!(
                    module = %layout.name,
                    step = step.name(),
                    errors = result.error_count(),
                    "compilation failed, check logs for more details"
                );
                return Err(BuildError::step_failed(
                    layout.name.clone(),
                    step.name(),
                    result.diagnostics,
                ));
            }

            executed.push(step.name());
            diagnostics.extend(
                result
                    .diagnostics
                    .into_iter()
                    .filter(|d| d.level != DiagnosticLevel::Error),
            );
        }

        Ok(ModuleReport {
            name: layout.name.clone(),
            status: ModuleStatus::Assembled,
            steps: executed,
            diagnostics,
            elapsed: start.elapsed(),
        })
    }
}
