use super::{ensure_dir, BuildStep, ModuleContext};
use crate::diagnostic::{CompilationResult, DiagnosticSink};
use crate::error::BuildResult;
use crate::tools::{JavaCompiler, JavacInvocation};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use walkdir::WalkDir;

const JAVA_EXTENSION: &str = "java";

/// Compiles `src/main/java` into `build/bin/java/classes`
pub struct JavaCompileStep {
    compiler: Arc<dyn JavaCompiler>,
}

impl JavaCompileStep {
    pub fn new(compiler: Arc<dyn JavaCompiler>) -> Self {
        Self { compiler }
    }
}

impl BuildStep for JavaCompileStep {
    fn name(&self) -> &'static str {
        "compileJava"
    }

    fn applies(&self, ctx: &ModuleContext<'_>) -> bool {
        ctx.layout.java_src.exists()
    }

    fn run(&self, ctx: &ModuleContext<'_>) -> BuildResult<CompilationResult> {
        let layout = ctx.layout;

        let sources = discover_java_sources(&layout.java_src);
        if sources.is_empty() {
            debug!(module = ctx.name(), "no Java sources, nothing to compile");
            return Ok(CompilationResult::empty_success());
        }

        ensure_dir(&layout.classes_out)?;

        let sources: Vec<PathBuf> = sources.into_iter().collect();
        let invocation = JavacInvocation {
            java_version: ctx.settings.java_version.clone(),
            class_output: layout.classes_out.clone(),
            platform_classpath: vec![
                ctx.settings.bootstrap_jar.clone(),
                ctx.settings.lambda_stubs_jar.clone(),
            ],
            classpath: Vec::new(),
            source_path: sources.clone(),
            sources,
        };

        info!(module = ctx.name(), files = invocation.sources.len(), "compiling Java sources");
        let output = self.compiler.compile(&invocation)?;
        let exited_cleanly = output.exited_cleanly();

        let mut sink = DiagnosticSink::new();
        sink.report_all(output.diagnostics);
        Ok(sink.finish(exited_cleanly))
    }
}

/// Every `.java` file under `root`, deduplicated
///
/// Symbolic links are followed; a file reachable through several links is
/// returned once, under its canonical path.
pub fn discover_java_sources(root: &Path) -> BTreeSet<PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry.path().extension().and_then(|s| s.to_str()) == Some(JAVA_EXTENSION)
        })
        .map(|entry| {
            fs::canonicalize(entry.path()).unwrap_or_else(|_| entry.path().to_path_buf())
        })
        .collect()
}
