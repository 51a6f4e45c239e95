//! aarkit build pipeline
//!
//! Assembles the library modules named in a project's include list into
//! linked resource archives and compiled classes:
//! - Include-list parsing and module inclusion checks
//! - Per-module path layout
//! - Resource compile and link through aapt2
//! - Java compilation through javac
//! - Diagnostic normalisation across both tools
//!
//! # Example
//!
//! ```no_run
//! use aarkit_build::ModuleAssembler;
//! use aarkit_config::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::new().load_from_directory(Path::new(".")).unwrap();
//! let assembler = ModuleAssembler::from_config(&config, ".").unwrap();
//! let report = assembler.run().unwrap();
//! println!("{} modules assembled", report.stats.assembled_modules);
//! ```

pub mod assembler;
pub mod diagnostic;
pub mod error;
pub mod include;
pub mod layout;
pub mod report;
pub mod steps;
pub mod tools;

// Re-export main types
pub use assembler::{clean_modules, plan_modules, skip_reason, ModuleAssembler, PlannedModule};
pub use diagnostic::{
    CompilationResult, Diagnostic, DiagnosticLevel, DiagnosticOrigin, DiagnosticSink,
    SourceLocation,
};
pub use error::{BuildError, BuildResult};
pub use include::ModuleNameList;
pub use layout::BuildLayout;
pub use report::{AssembleReport, BuildStats, ModuleReport, ModuleStatus, SkipReason};
pub use steps::{
    default_steps, discover_java_sources, BuildStep, JavaCompileStep, ModuleContext,
    ResourceCompileStep, ResourceLinkStep,
};
pub use tools::{
    parse_tool_output, Aapt2Process, JavaCompiler, JavacInvocation, JavacProcess, ResourceTool,
    ToolOutput,
};

// Re-export config types for convenience
pub use aarkit_config::ModuleSettings;
