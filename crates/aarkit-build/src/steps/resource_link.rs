use super::{create_new_file, ensure_dir, BuildStep, ModuleContext};
use crate::diagnostic::{CompilationResult, DiagnosticSink};
use crate::error::{BuildError, BuildResult};
use crate::layout::{BuildLayout, PROGUARD_FILE_NAME};
use crate::tools::{path_arg, ResourceTool};
use aarkit_config::ModuleSettings;
use std::fs;
use std::sync::Arc;
use tracing::debug;

/// Links the compiled resources against the manifest and platform jar
///
/// Produces `build/bin/generated.aar.res`, accessor sources under `build/gen`
/// and the `R.txt` symbol table.
pub struct ResourceLinkStep {
    tool: Arc<dyn ResourceTool>,
}

impl ResourceLinkStep {
    pub fn new(tool: Arc<dyn ResourceTool>) -> Self {
        Self { tool }
    }

    /// Linker arguments. `include_assets` adds `-A <assets>` at the end.
    pub fn link_args(
        layout: &BuildLayout,
        settings: &ModuleSettings,
        include_assets: bool,
    ) -> BuildResult<Vec<String>> {
        let mut args = vec![
            "-I".to_string(),
            path_arg(&settings.bootstrap_jar)?,
            "--allow-reserved-package-id".to_string(),
            "--no-version-vectors".to_string(),
            "--no-version-transitions".to_string(),
            "--auto-add-overlay".to_string(),
            "--min-sdk-version".to_string(),
            settings.min_sdk.to_string(),
            "--target-sdk-version".to_string(),
            settings.target_sdk.to_string(),
            "--proguard".to_string(),
            path_arg(&layout.proguard_rules())?,
            "-R".to_string(),
            path_arg(&layout.compiled_resources())?,
            "--java".to_string(),
            path_arg(&layout.gen)?,
            "--manifest".to_string(),
            path_arg(&layout.manifest)?,
            "-o".to_string(),
            path_arg(&layout.linked_archive())?,
            "--output-text-symbols".to_string(),
            path_arg(&layout.symbols())?,
        ];

        if include_assets {
            args.push("-A".to_string());
            args.push(path_arg(&layout.assets)?);
        }

        Ok(args)
    }

    /// Create the files and directories the linker expects, and check inputs
    fn prepare(&self, ctx: &ModuleContext<'_>) -> BuildResult<()> {
        let layout = ctx.layout;

        create_new_file(&layout.bin_res, PROGUARD_FILE_NAME)?;

        let compiled = layout.compiled_resources();
        if !compiled.exists() {
            return Err(BuildError::missing_input(ctx.name(), compiled));
        }

        ensure_dir(&layout.gen)?;

        if !layout.manifest.exists() {
            return Err(BuildError::missing_input(ctx.name(), &layout.manifest));
        }

        // Fresh symbol table every run; the linker must not see old content.
        let symbols = layout.symbols();
        match fs::remove_file(&symbols) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(BuildError::io(&symbols, e)),
        }
        fs::File::create(&symbols).map_err(|e| BuildError::io(&symbols, e))?;

        Ok(())
    }
}

impl BuildStep for ResourceLinkStep {
    fn name(&self) -> &'static str {
        "linkResources"
    }

    fn run(&self, ctx: &ModuleContext<'_>) -> BuildResult<CompilationResult> {
        self.prepare(ctx)?;

        let include_assets = ctx.layout.assets.exists();
        let args = Self::link_args(ctx.layout, ctx.settings, include_assets)?;
        debug!(module = ctx.name(), include_assets, ?args, "aapt2 link");

        let output = self.tool.link(&args)?;
        let exited_cleanly = output.exited_cleanly();

        let mut sink = DiagnosticSink::new();
        sink.report_all(output.diagnostics);
        Ok(sink.finish(exited_cleanly))
    }
}
