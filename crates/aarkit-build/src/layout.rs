//! Per-module source and build-output paths
//!
//! Every path the pipeline reads or writes for a module is derived here from
//! the project root and the module name. Nothing in this module touches the
//! file system; callers decide what to check and create.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Name of the combined resource archive written by the linker
pub const LINKED_ARCHIVE_NAME: &str = "generated.aar.res";
/// Name of the symbol table written by the linker
pub const SYMBOLS_FILE_NAME: &str = "R.txt";
/// Name of the keep-rules file written by the linker
pub const PROGUARD_FILE_NAME: &str = "proguard.txt";

/// Fixed set of paths for one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildLayout {
    /// Module name
    pub name: String,
    /// `<root>/<name>/src/main/res`
    pub res: PathBuf,
    /// `<root>/<name>/build/bin/res`
    pub bin_res: PathBuf,
    /// `<root>/<name>/build`
    pub build: PathBuf,
    /// `<root>/<name>/src/main/AndroidManifest.xml`
    pub manifest: PathBuf,
    /// `<root>/<name>/src/main/assets`
    pub assets: PathBuf,
    /// `<root>/<name>/src/main/java`
    pub java_src: PathBuf,
    /// `<root>/<name>/build/bin/java/classes`
    pub classes_out: PathBuf,
    /// `<root>/<name>/build/gen`
    pub gen: PathBuf,
}

impl BuildLayout {
    /// Compute the layout of `name` under `project_root`
    pub fn new(project_root: impl AsRef<Path>, name: impl Into<String>) -> Self {
        let name = name.into();
        let module_root = project_root.as_ref().join(&name);
        let main = module_root.join("src").join("main");
        let build = module_root.join("build");
        let bin = build.join("bin");

        Self {
            res: main.join("res"),
            bin_res: bin.join("res"),
            manifest: main.join("AndroidManifest.xml"),
            assets: main.join("assets"),
            java_src: main.join("java"),
            classes_out: bin.join("java").join("classes"),
            gen: build.join("gen"),
            build,
            name,
        }
    }

    /// Intermediate archive produced by the resource compiler
    pub fn compiled_resources(&self) -> PathBuf {
        self.bin_res.join(format!("{}_res.zip", self.name))
    }

    /// Symbol table written by the linker
    pub fn symbols(&self) -> PathBuf {
        self.bin_res.join(SYMBOLS_FILE_NAME)
    }

    /// Keep rules written by the linker
    pub fn proguard_rules(&self) -> PathBuf {
        self.bin_res.join(PROGUARD_FILE_NAME)
    }

    /// Combined archive written by the linker, next to `bin/res`
    pub fn linked_archive(&self) -> PathBuf {
        self.bin_res
            .parent()
            .unwrap_or(&self.bin_res)
            .join(LINKED_ARCHIVE_NAME)
    }
}
