//! Call interfaces for the external tools
//!
//! The pipeline never talks to aapt2 or javac directly. It goes through
//! [`ResourceTool`] and [`JavaCompiler`], which block until the tool is done
//! and hand back its exit status together with the complete, normalised
//! diagnostic list. [`Aapt2Process`] and [`JavacProcess`] are the process-backed
//! implementations used by the CLI.

mod aapt2;
mod javac;
mod output;

pub use aapt2::Aapt2Process;
pub use javac::JavacProcess;
pub use output::parse_tool_output;

use crate::diagnostic::{Diagnostic, DiagnosticOrigin};
use crate::error::{BuildError, BuildResult};
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Exit status and diagnostics of one tool invocation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolOutput {
    /// Exit status; `-1` when the process was terminated by a signal
    pub status: i32,
    /// Diagnostics in the order the tool emitted them
    pub diagnostics: Vec<Diagnostic>,
}

impl ToolOutput {
    pub fn new(status: i32, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            status,
            diagnostics,
        }
    }

    /// Whether the tool itself reported success
    pub fn exited_cleanly(&self) -> bool {
        self.status == 0
    }
}

/// Resource compiler and linker (aapt2)
pub trait ResourceTool: Send + Sync {
    /// `aapt2 compile <args>`
    fn compile(&self, args: &[String]) -> BuildResult<ToolOutput>;

    /// `aapt2 link <args>`
    fn link(&self, args: &[String]) -> BuildResult<ToolOutput>;
}

/// Java compiler
pub trait JavaCompiler: Send + Sync {
    /// Compile the given sources. Parsing, analysis and generation all happen
    /// inside this call; generation is skipped by the compiler when analysis
    /// failed.
    fn compile(&self, invocation: &JavacInvocation) -> BuildResult<ToolOutput>;
}

/// Everything the Java compiler needs for one compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavacInvocation {
    /// Source and target level, e.g. "1.8"
    pub java_version: String,
    /// Directory receiving class files
    pub class_output: PathBuf,
    /// Bootstrap entries (platform jar, lambda stubs)
    pub platform_classpath: Vec<PathBuf>,
    /// User classpath
    pub classpath: Vec<PathBuf>,
    /// Source path entries
    pub source_path: Vec<PathBuf>,
    /// Compilation units
    pub sources: Vec<PathBuf>,
}

/// Path as passed on a tool command line
///
/// Paths that are not valid UTF-8 are rejected rather than rewritten, so a
/// tool never receives a path other than the one on disk.
pub(crate) fn path_arg(path: &Path) -> BuildResult<String> {
    path.to_str().map(str::to_string).ok_or_else(|| {
        BuildError::io(
            path,
            io::Error::new(io::ErrorKind::InvalidData, "path is not valid UTF-8"),
        )
    })
}

/// Run a tool to completion and normalise what it printed
fn run_process<I, S>(program: &Path, args: I, origin: DiagnosticOrigin) -> BuildResult<ToolOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args);
    debug!(command = ?command, "launching {}", origin);

    let output = command
        .output()
        .map_err(|e| BuildError::tool_unavailable(program.display().to_string(), e))?;

    let status = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    let mut diagnostics = parse_tool_output(&stderr, origin);
    diagnostics.extend(parse_tool_output(&stdout, origin));

    debug!(status, diagnostics = diagnostics.len(), "{} finished", origin);
    Ok(ToolOutput::new(status, diagnostics))
}
