use super::{run_process, ResourceTool, ToolOutput};
use crate::diagnostic::DiagnosticOrigin;
use crate::error::BuildResult;
use std::path::{Path, PathBuf};

/// aapt2 executable driven through `compile` and `link` subcommands
#[derive(Debug, Clone)]
pub struct Aapt2Process {
    executable: PathBuf,
}

impl Aapt2Process {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn run(&self, subcommand: &str, args: &[String], origin: DiagnosticOrigin) -> BuildResult<ToolOutput> {
        let full_args = std::iter::once(subcommand).chain(args.iter().map(String::as_str));
        run_process(&self.executable, full_args, origin)
    }
}

impl Default for Aapt2Process {
    fn default() -> Self {
        Self::new("aapt2")
    }
}

impl ResourceTool for Aapt2Process {
    fn compile(&self, args: &[String]) -> BuildResult<ToolOutput> {
        self.run("compile", args, DiagnosticOrigin::ResourceCompiler)
    }

    fn link(&self, args: &[String]) -> BuildResult<ToolOutput> {
        self.run("link", args, DiagnosticOrigin::ResourceLinker)
    }
}
