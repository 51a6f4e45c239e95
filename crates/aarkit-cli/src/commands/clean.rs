//! Clean command - delete build directories of included modules

use super::{Project, ProjectArgs};
use aarkit_build::{clean_modules, ModuleNameList};
use anyhow::{Context, Result};

/// Run the clean command
pub fn run(args: &ProjectArgs, quiet: bool) -> Result<()> {
    let project = Project::load(args)?;
    let names = ModuleNameList::parse(project.config.include_list());

    let removed =
        clean_modules(&project.root, &names).context("Failed to clean build directories")?;

    if !quiet {
        if removed.is_empty() {
            println!("Nothing to clean");
        }
        for path in &removed {
            println!("Removed {}", path.display());
        }
    }
    Ok(())
}
