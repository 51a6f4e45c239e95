pub mod assemble;
pub mod clean;
pub mod layout;
pub mod modules;

use aarkit_config::{Config, ConfigLoader};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Options shared by every command that reads a project
#[derive(Debug, Default)]
pub struct ProjectArgs {
    /// Project directory (defaults to current directory)
    pub project_dir: Option<PathBuf>,
    /// Include list overriding aarkit.toml and AARKIT_INCLUDE
    pub include: Option<String>,
}

/// Loaded configuration plus the directory holding the module directories
pub struct Project {
    pub config: Config,
    pub root: PathBuf,
}

impl Project {
    /// Load aarkit.toml (searching upwards) and apply `--include`
    ///
    /// The project root is the directory holding aarkit.toml, or the start
    /// directory when there is none.
    pub fn load(args: &ProjectArgs) -> Result<Self> {
        let start = args
            .project_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let start = start
            .canonicalize()
            .with_context(|| format!("Project directory not found: {}", start.display()))?;

        let mut config = ConfigLoader::new()
            .load_from_directory(&start)
            .context("Failed to load aarkit.toml")?;

        if let Some(ref include) = args.include {
            config.project.assemble_mut().include = Some(include.clone());
        }

        let root = config
            .project_root()
            .map(|p| p.to_path_buf())
            .unwrap_or(start);

        Ok(Self { config, root })
    }
}
