//! Layout command - print the paths used for one module

use super::{Project, ProjectArgs};
use aarkit_build::{skip_reason, BuildLayout};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Run the layout command
pub fn run(args: &ProjectArgs, module: &str, json: bool) -> Result<()> {
    let project = Project::load(args)?;
    let layout = BuildLayout::new(&project.root, module);
    let skip = skip_reason(&layout);

    if json {
        println!(
            "{}",
            serde_json::json!({
                "layout": layout,
                "compiled_resources": layout.compiled_resources(),
                "linked_archive": layout.linked_archive(),
                "symbols": layout.symbols(),
                "proguard_rules": layout.proguard_rules(),
                "included": skip.is_none(),
                "skip_reason": skip,
            })
        );
        return Ok(());
    }

    println!("{}", layout.name.bold());
    let compiled = layout.compiled_resources();
    let archive = layout.linked_archive();
    let symbols = layout.symbols();
    let proguard = layout.proguard_rules();
    let rows: [(&str, &Path); 12] = [
        ("res", layout.res.as_path()),
        ("manifest", layout.manifest.as_path()),
        ("assets", layout.assets.as_path()),
        ("java", layout.java_src.as_path()),
        ("build", layout.build.as_path()),
        ("bin/res", layout.bin_res.as_path()),
        ("classes", layout.classes_out.as_path()),
        ("gen", layout.gen.as_path()),
        ("compiled", compiled.as_path()),
        ("archive", archive.as_path()),
        ("symbols", symbols.as_path()),
        ("proguard", proguard.as_path()),
    ];
    for (label, path) in rows {
        let marker = if path.exists() { "✓".green() } else { " ".normal() };
        println!("  {} {:<9} {}", marker, label, path.display());
    }

    match skip {
        None => println!("{}", "Module will be assembled".green()),
        Some(reason) => println!("{}", format!("Module will be skipped: {}", reason).yellow()),
    }
    Ok(())
}
