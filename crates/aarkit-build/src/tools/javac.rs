use super::{path_arg, run_process, JavaCompiler, JavacInvocation, ToolOutput};
use crate::diagnostic::DiagnosticOrigin;
use crate::error::BuildResult;
use std::path::{Path, PathBuf};

#[cfg(windows)]
const PATH_LIST_SEPARATOR: &str = ";";
#[cfg(not(windows))]
const PATH_LIST_SEPARATOR: &str = ":";

/// javac executable
#[derive(Debug, Clone)]
pub struct JavacProcess {
    executable: PathBuf,
}

impl JavacProcess {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Command line for an invocation, without the executable
    pub fn command_line(invocation: &JavacInvocation) -> BuildResult<Vec<String>> {
        let mut args = vec![
            "-source".to_string(),
            invocation.java_version.clone(),
            "-target".to_string(),
            invocation.java_version.clone(),
            "-encoding".to_string(),
            "UTF-8".to_string(),
            "-d".to_string(),
            path_arg(&invocation.class_output)?,
            "-bootclasspath".to_string(),
            join_paths(&invocation.platform_classpath)?,
            "-classpath".to_string(),
            join_paths(&invocation.classpath)?,
            "-sourcepath".to_string(),
            join_paths(&invocation.source_path)?,
        ];
        for source in &invocation.sources {
            args.push(path_arg(source)?);
        }
        Ok(args)
    }
}

impl Default for JavacProcess {
    fn default() -> Self {
        Self::new("javac")
    }
}

impl JavaCompiler for JavacProcess {
    fn compile(&self, invocation: &JavacInvocation) -> BuildResult<ToolOutput> {
        run_process(
            &self.executable,
            Self::command_line(invocation)?,
            DiagnosticOrigin::JavaCompiler,
        )
    }
}

fn join_paths(paths: &[PathBuf]) -> BuildResult<String> {
    let parts = paths
        .iter()
        .map(|p| path_arg(p))
        .collect::<BuildResult<Vec<_>>>()?;
    Ok(parts.join(PATH_LIST_SEPARATOR))
}
