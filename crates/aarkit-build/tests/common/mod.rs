//! Shared fixtures: scratch projects and recording fake tools
#![allow(dead_code)]

use aarkit_build::{
    BuildResult, Diagnostic, DiagnosticOrigin, JavaCompiler, JavacInvocation, ModuleSettings,
    ResourceTool, SourceLocation, ToolOutput,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const MANIFEST: &str = r#"<manifest package="com.example.lib"/>"#;
pub const STRINGS: &str = r#"<resources><string name="app_name">Lib</string></resources>"#;
pub const SYMBOLS: &str = "int string app_name 0x7f010000\n";

/// Write `content` at `root/rel`, creating parents
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Create a module with resources and a manifest
pub fn add_module(root: &Path, name: &str) {
    write_file(root, &format!("{name}/src/main/res/values/strings.xml"), STRINGS);
    write_file(root, &format!("{name}/src/main/AndroidManifest.xml"), MANIFEST);
}

/// Add a Java source file to a module
pub fn add_java(root: &Path, module: &str, rel: &str, content: &str) {
    write_file(root, &format!("{module}/src/main/java/{rel}"), content);
}

pub fn temp_project() -> TempDir {
    tempfile::tempdir().unwrap()
}

pub fn settings(include: &str) -> ModuleSettings {
    ModuleSettings::new("/sdk/android.jar", "/sdk/core-lambda-stubs.jar").with_include(include)
}

/// Value following `flag` in an argument list
pub fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceCall {
    Compile(Vec<String>),
    Link(Vec<String>),
}

impl ResourceCall {
    pub fn args(&self) -> &[String] {
        match self {
            Self::Compile(args) | Self::Link(args) => args,
        }
    }
}

/// aapt2 stand-in that writes deterministic outputs
#[derive(Default)]
pub struct FakeAapt2 {
    pub calls: Mutex<Vec<ResourceCall>>,
    /// R.txt content seen at the moment link was invoked
    pub symbols_at_link: Mutex<Vec<String>>,
    /// Modules (by output zip name prefix) whose compile exits non-zero
    pub fail_compile: Vec<String>,
    /// Fail every link with a non-zero status
    pub fail_link: bool,
    /// Extra diagnostics returned by every link
    pub link_diagnostics: Vec<Diagnostic>,
}

impl FakeAapt2 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ResourceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn symbols_at_link(&self) -> Vec<String> {
        self.symbols_at_link.lock().unwrap().clone()
    }

    /// Resource directories passed to compile, in call order
    pub fn compiled_dirs(&self) -> Vec<PathBuf> {
        self.calls()
            .iter()
            .filter_map(|c| match c {
                ResourceCall::Compile(args) => flag_value(args, "--dir").map(PathBuf::from),
                ResourceCall::Link(_) => None,
            })
            .collect()
    }
}

impl ResourceTool for FakeAapt2 {
    fn compile(&self, args: &[String]) -> BuildResult<ToolOutput> {
        self.calls
            .lock()
            .unwrap()
            .push(ResourceCall::Compile(args.to_vec()));

        let dir = flag_value(args, "--dir").unwrap();
        let out = PathBuf::from(flag_value(args, "-o").unwrap());
        let file_name = out.file_name().unwrap().to_string_lossy().to_string();

        if self.fail_compile.iter().any(|m| file_name == format!("{m}_res.zip")) {
            let diagnostic = Diagnostic::error(DiagnosticOrigin::ResourceCompiler, "file failed to compile")
                .with_location(SourceLocation::new(dir).with_line(1));
            return Ok(ToolOutput::new(1, vec![diagnostic]));
        }

        fs::write(&out, format!("compiled {}", dir)).unwrap();
        Ok(ToolOutput::new(0, Vec::new()))
    }

    fn link(&self, args: &[String]) -> BuildResult<ToolOutput> {
        self.calls.lock().unwrap().push(ResourceCall::Link(args.to_vec()));

        let symbols = PathBuf::from(flag_value(args, "--output-text-symbols").unwrap());
        self.symbols_at_link
            .lock()
            .unwrap()
            .push(fs::read_to_string(&symbols).unwrap_or_else(|_| "<missing>".to_string()));

        if self.fail_link {
            return Ok(ToolOutput::new(
                1,
                vec![Diagnostic::error(
                    DiagnosticOrigin::ResourceLinker,
                    "failed linking references.",
                )],
            ));
        }

        let input = fs::read_to_string(flag_value(args, "-R").unwrap()).unwrap();
        fs::write(flag_value(args, "-o").unwrap(), format!("linked [{}]", input)).unwrap();
        fs::write(&symbols, SYMBOLS).unwrap();
        write_file(Path::new(flag_value(args, "--java").unwrap()), "com/example/lib/R.java", "class R {}");

        Ok(ToolOutput::new(0, self.link_diagnostics.clone()))
    }
}

/// javac stand-in: `= }` in a source is a syntax error, everything else
/// compiles to `<Stem>.class`
pub struct FakeJavac {
    pub invocations: Mutex<Vec<JavacInvocation>>,
    /// Exit status reported when errors were found
    pub error_status: i32,
    /// Warning emitted for every compiled file
    pub warn_each_file: bool,
}

impl Default for FakeJavac {
    fn default() -> Self {
        Self {
            invocations: Mutex::new(Vec::new()),
            error_status: 0,
            warn_each_file: false,
        }
    }
}

impl FakeJavac {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invocations(&self) -> Vec<JavacInvocation> {
        self.invocations.lock().unwrap().clone()
    }
}

impl JavaCompiler for FakeJavac {
    fn compile(&self, invocation: &JavacInvocation) -> BuildResult<ToolOutput> {
        self.invocations.lock().unwrap().push(invocation.clone());

        let mut diagnostics = Vec::new();
        for source in &invocation.sources {
            let text = fs::read_to_string(source).unwrap();
            if let Some(line) = text.lines().position(|l| l.contains("= }")) {
                diagnostics.push(
                    Diagnostic::error(DiagnosticOrigin::JavaCompiler, "illegal start of expression")
                        .with_location(SourceLocation::new(source).with_line(line as u32 + 1)),
                );
            } else if self.warn_each_file {
                diagnostics.push(
                    Diagnostic::warning(DiagnosticOrigin::JavaCompiler, "unchecked call")
                        .with_location(SourceLocation::new(source)),
                );
            }
        }

        if diagnostics.iter().any(|d| d.is_error()) {
            return Ok(ToolOutput::new(self.error_status, diagnostics));
        }

        for source in &invocation.sources {
            let stem = source.file_stem().unwrap().to_string_lossy();
            fs::write(invocation.class_output.join(format!("{stem}.class")), b"\xCA\xFE\xBA\xBE").unwrap();
        }
        Ok(ToolOutput::new(0, diagnostics))
    }
}

pub fn fakes() -> (Arc<FakeAapt2>, Arc<FakeJavac>) {
    (Arc::new(FakeAapt2::new()), Arc::new(FakeJavac::new()))
}
