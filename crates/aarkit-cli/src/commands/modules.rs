//! Modules command - show the include list and inclusion decisions

use super::{Project, ProjectArgs};
use aarkit_build::{plan_modules, ModuleNameList};
use anyhow::Result;
use colored::Colorize;

/// Run the modules command
pub fn run(args: &ProjectArgs, json: bool) -> Result<()> {
    let project = Project::load(args)?;
    let names = ModuleNameList::parse(project.config.include_list());
    let plan = plan_modules(&project.root, &names);

    if json {
        let modules: Vec<_> = plan
            .iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.layout.name,
                    "included": p.is_included(),
                    "skip_reason": p.skip,
                    "layout": p.layout,
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::json!({
                "root": project.root,
                "include": names.to_string(),
                "modules": modules,
            })
        );
        return Ok(());
    }

    println!("Project root: {}", project.root.display());
    if plan.is_empty() {
        println!("No modules configured (include list is {})", names);
        return Ok(());
    }

    for planned in &plan {
        match planned.skip {
            None => println!("  {} {}", "✓".green(), planned.layout.name.bold()),
            Some(reason) => println!(
                "  {} {} {}",
                "-".dimmed(),
                planned.layout.name,
                format!("(skipped: {})", reason).dimmed()
            ),
        }
    }

    let included = plan.iter().filter(|p| p.is_included()).count();
    println!("{} of {} modules will be assembled", included, plan.len());
    Ok(())
}
