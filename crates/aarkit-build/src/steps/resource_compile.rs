use super::{create_new_file, BuildStep, ModuleContext};
use crate::diagnostic::{CompilationResult, DiagnosticSink};
use crate::error::BuildResult;
use crate::layout::BuildLayout;
use crate::tools::{path_arg, ResourceTool};
use std::sync::Arc;
use tracing::debug;

/// Compiles `src/main/res` into `build/bin/res/<name>_res.zip`
pub struct ResourceCompileStep {
    tool: Arc<dyn ResourceTool>,
}

impl ResourceCompileStep {
    pub fn new(tool: Arc<dyn ResourceTool>) -> Self {
        Self { tool }
    }

    /// `--dir <res> -o <bin_res>/<name>_res.zip`
    pub fn compile_args(layout: &BuildLayout) -> BuildResult<Vec<String>> {
        Ok(vec![
            "--dir".to_string(),
            path_arg(&layout.res)?,
            "-o".to_string(),
            path_arg(&layout.compiled_resources())?,
        ])
    }
}

impl BuildStep for ResourceCompileStep {
    fn name(&self) -> &'static str {
        "compileResources"
    }

    fn run(&self, ctx: &ModuleContext<'_>) -> BuildResult<CompilationResult> {
        let layout = ctx.layout;
        create_new_file(&layout.bin_res, &format!("{}_res.zip", layout.name))?;

        let args = Self::compile_args(layout)?;
        debug!(module = ctx.name(), ?args, "aapt2 compile");

        let output = self.tool.compile(&args)?;
        let exited_cleanly = output.exited_cleanly();

        let mut sink = DiagnosticSink::new();
        sink.report_all(output.diagnostics);
        Ok(sink.finish(exited_cleanly))
    }
}
