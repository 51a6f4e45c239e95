//! Assemble command - compile and link the configured library modules

use super::{Project, ProjectArgs};
use aarkit_build::{
    AssembleReport, BuildError, Diagnostic, DiagnosticLevel, ModuleAssembler, ModuleStatus,
};
use anyhow::{Context, Result};
use colored::Colorize;

/// Assemble command arguments
#[derive(Default)]
pub struct AssembleArgs {
    pub project: ProjectArgs,
    /// Quiet output (errors only)
    pub quiet: bool,
    /// JSON output
    pub json: bool,
}

/// Run the assemble command
pub fn run(args: AssembleArgs) -> Result<()> {
    let project = Project::load(&args.project)?;

    let assembler = ModuleAssembler::from_config(&project.config, &project.root)
        .context("Failed to configure assembler")?;

    match assembler.run() {
        Ok(report) => {
            if args.json {
                print_json_report(&report);
            } else if !args.quiet {
                print_report(&report);
            }
            Ok(())
        }
        Err(err) => {
            if args.json {
                print_json_failure(&err);
            }
            Err(err).context("Assembly failed")
        }
    }
}

fn print_report(report: &AssembleReport) {
    println!("\n{}", "=".repeat(60));
    for module in &report.modules {
        match module.status {
            ModuleStatus::Assembled => {
                println!(
                    "  {} {} ({}) {:.2}s",
                    "✓".green(),
                    module.name.bold(),
                    module.steps.join(", "),
                    module.elapsed.as_secs_f64()
                );
                for diagnostic in &module.diagnostics {
                    println!("      {}", format_diagnostic(diagnostic));
                }
            }
            ModuleStatus::Skipped(reason) => {
                println!("  {} {} skipped: {}", "-".dimmed(), module.name, reason);
            }
        }
    }
    println!("{}", "=".repeat(60));
    println!(
        "{} {} assembled, {} skipped in {:.2}s",
        "Assembly succeeded:".green().bold(),
        report.stats.assembled_modules,
        report.stats.skipped_modules,
        report.stats.total_time.as_secs_f64()
    );
}

fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    let text = diagnostic.to_string();
    match diagnostic.level {
        DiagnosticLevel::Error => text.red().to_string(),
        DiagnosticLevel::Warning => text.yellow().to_string(),
        DiagnosticLevel::Note => text.dimmed().to_string(),
    }
}

fn print_json_report(report: &AssembleReport) {
    let modules: Vec<_> = report
        .modules
        .iter()
        .map(|m| {
            let (status, reason) = match m.status {
                ModuleStatus::Assembled => ("assembled", None),
                ModuleStatus::Skipped(reason) => ("skipped", Some(reason)),
            };
            serde_json::json!({
                "name": m.name,
                "status": status,
                "skip_reason": reason,
                "steps": m.steps,
                "diagnostics": m.diagnostics,
                "time": m.elapsed.as_secs_f64(),
            })
        })
        .collect();

    println!(
        "{}",
        serde_json::json!({
            "success": true,
            "total_time": report.stats.total_time.as_secs_f64(),
            "modules": report.stats.total_modules,
            "assembled_modules": report.stats.assembled_modules,
            "skipped_modules": report.stats.skipped_modules,
            "results": modules,
        })
    );
}

fn print_json_failure(err: &BuildError) {
    let (module, step) = match err {
        BuildError::StepFailed { module, step, .. } => (Some(module), Some(step)),
        BuildError::MissingInput { module, .. } => (Some(module), None),
        _ => (None, None),
    };

    println!(
        "{}",
        serde_json::json!({
            "success": false,
            "error": err.to_string(),
            "module": module,
            "step": step,
            "diagnostics": err.diagnostics(),
        })
    );
}
