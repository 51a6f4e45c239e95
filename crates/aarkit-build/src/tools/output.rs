//! Normalisation of tool console output into diagnostics
//!
//! Both aapt2 and javac print one header line per diagnostic:
//!
//! ```text
//! src/main/java/Foo.java:3: error: ';' expected
//! res/values/strings.xml:7: warn: string 'x' has no default translation.
//! error: failed linking references.
//! Note: Foo.java uses unchecked or unsafe operations.
//! ```
//!
//! followed by optional continuation lines (source excerpt, caret). Headers
//! always start in column 0; indented lines are never headers. Summary
//! lines such as `2 errors` carry no information and are dropped.

use crate::diagnostic::{Diagnostic, DiagnosticLevel, DiagnosticOrigin, SourceLocation};
use regex::Regex;
use std::sync::OnceLock;

fn header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?:(?P<file>\S.*?)(?::(?P<line>\d+))?(?::(?P<col>\d+))?:\s+)?(?P<level>(?i:fatal error|error|warning|warn|note)):\s*(?P<msg>.*)$",
        )
        .expect("diagnostic header pattern is valid")
    })
}

fn summary_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d+ (?:errors?|warnings?)$").expect("summary pattern is valid")
    })
}

/// Parse a tool's console output into diagnostics
pub fn parse_tool_output(text: &str, origin: DiagnosticOrigin) -> Vec<Diagnostic> {
    let header = header_pattern();
    let summary = summary_pattern();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim_end();
        if trimmed.trim().is_empty() || summary.is_match(trimmed.trim()) {
            continue;
        }

        if let Some(caps) = header.captures(trimmed) {
            let level = DiagnosticLevel::from_tag(&caps["level"]).unwrap_or(DiagnosticLevel::Note);
            let mut diagnostic = Diagnostic::new(level, origin, caps["msg"].trim());

            if let Some(file) = caps.name("file") {
                let mut location = SourceLocation::new(file.as_str());
                if let Some(line_no) = caps.name("line").and_then(|m| m.as_str().parse().ok()) {
                    location = location.with_line(line_no);
                }
                if let Some(col) = caps.name("col").and_then(|m| m.as_str().parse().ok()) {
                    location = location.with_column(col);
                }
                diagnostic = diagnostic.with_location(location);
            }

            diagnostics.push(diagnostic);
            continue;
        }

        match diagnostics.last_mut() {
            Some(previous) => previous.notes.push(trimmed.to_string()),
            None => diagnostics.push(Diagnostic::note(origin, trimmed.trim())),
        }
    }

    diagnostics
}
