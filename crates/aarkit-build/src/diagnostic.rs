//! Diagnostics from the external tools
//!
//! The resource compiler/linker and the Java compiler report problems in
//! different shapes. Both are normalised into [`Diagnostic`] before anything
//! else sees them. A [`DiagnosticSink`] collects them for exactly one step
//! invocation and turns them into a [`CompilationResult`].

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    /// Fails the step that produced it
    Error,
    /// Recorded, never fails a step
    Warning,
    /// Advisory output (javac "Note:", aapt2 "note:")
    Note,
}

impl DiagnosticLevel {
    /// Parse a tool's severity tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "error" | "fatal error" => Some(Self::Error),
            "warning" | "warn" => Some(Self::Warning),
            "note" | "info" => Some(Self::Note),
            _ => None,
        }
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Note => write!(f, "note"),
        }
    }
}

/// Which external tool produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticOrigin {
    ResourceCompiler,
    ResourceLinker,
    JavaCompiler,
}

impl fmt::Display for DiagnosticOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceCompiler => write!(f, "aapt2 compile"),
            Self::ResourceLinker => write!(f, "aapt2 link"),
            Self::JavaCompiler => write!(f, "javac"),
        }
    }
}

/// Where a diagnostic points
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    /// File path as reported by the tool
    pub file: PathBuf,
    /// Line number (1-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// Column number (1-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl SourceLocation {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            line: None,
            column: None,
        }
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_column(mut self, column: u32) -> Self {
        self.column = Some(column);
        self
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
            if let Some(column) = self.column {
                write!(f, ":{}", column)?;
            }
        }
        Ok(())
    }
}

/// A message emitted by an external tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Producing tool
    pub origin: DiagnosticOrigin,
    /// Main message
    pub message: String,
    /// Source location, when the tool reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    /// Continuation lines (source excerpt, caret, hints)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, origin: DiagnosticOrigin, message: impl Into<String>) -> Self {
        Self {
            level,
            origin,
            message: message.into(),
            location: None,
            notes: Vec::new(),
        }
    }

    pub fn error(origin: DiagnosticOrigin, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, origin, message)
    }

    pub fn warning(origin: DiagnosticOrigin, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, origin, message)
    }

    pub fn note(origin: DiagnosticOrigin, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Note, origin, message)
    }

    /// Attach a source location
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }

    /// Forward this diagnostic to the log at its severity
    pub fn log(&self) {
        match self.level {
            DiagnosticLevel::Error => error!(tool = %self.origin, "{}", self),
            DiagnosticLevel::Warning => warn!(tool = %self.origin, "{}", self),
            DiagnosticLevel::Note => info!(tool = %self.origin, "{}", self),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(f, "{}: ", location)?;
        }
        write!(f, "{}: {}", self.level, self.message)
    }
}

/// Outcome of one step invocation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompilationResult {
    /// False if the tool exited non-zero or reported any error
    pub success: bool,
    /// Everything the tool reported during this invocation
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationResult {
    /// A successful result with nothing to report
    pub fn empty_success() -> Self {
        Self {
            success: true,
            diagnostics: Vec::new(),
        }
    }

    /// Error-level diagnostics only
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }
}

/// Collects diagnostics for a single step invocation
///
/// The sink is consumed by [`DiagnosticSink::finish`], so error state can never
/// carry over from one module's step into the next.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one diagnostic and forward it to the log
    pub fn report(&mut self, diagnostic: Diagnostic) {
        diagnostic.log();
        self.has_errors |= diagnostic.is_error();
        self.diagnostics.push(diagnostic);
    }

    /// Record every diagnostic in order
    pub fn report_all(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.report(diagnostic);
        }
    }

    /// Close the sink. `tool_succeeded` is the tool's own verdict (exit status);
    /// any error diagnostic fails the result regardless.
    pub fn finish(self, tool_succeeded: bool) -> CompilationResult {
        CompilationResult {
            success: tool_succeeded && !self.has_errors,
            diagnostics: self.diagnostics,
        }
    }
}
