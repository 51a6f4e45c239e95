use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod logging;

/// Android library module assembler.
///
/// Compiles and links the resources of every library module named in the
/// project's include list, then compiles the module's Java sources against
/// the platform archives. Modules without a resource directory or manifest
/// are skipped.
///
/// EXAMPLES:
///     aarkit assemble                     Assemble modules from aarkit.toml
///     aarkit assemble --include "[core]"  Assemble a single module
///     aarkit modules                      Show which modules would be built
///     aarkit layout core                  Print the paths used for a module
///     aarkit clean                        Delete build directories
///
/// ENVIRONMENT VARIABLES:
///     AARKIT_JSON              Set to '1' for JSON output by default
///     AARKIT_INCLUDE           Include list, e.g. "[core, ui]"
///     AARKIT_BOOTSTRAP_JAR     Platform archive (android.jar)
///     AARKIT_LAMBDA_STUBS_JAR  Lambda stubs archive
///     AARKIT_AAPT2             aapt2 executable
///     AARKIT_JAVAC             javac executable
///     AARKIT_NO_COLOR          Set to disable colored output
///     RUST_LOG                 Log filter (overrides --verbose/--quiet)
#[derive(Parser)]
#[command(name = "aarkit")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    /// Quiet output (errors only)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the configured library modules
    ///
    /// For each included module: delete build/, compile resources, link
    /// them into build/bin/generated.aar.res and compile src/main/java.
    /// Stops at the first failing module.
    ///
    /// EXAMPLES:
    ///     aarkit assemble                         Assemble from aarkit.toml
    ///     aarkit assemble -C android/libs         Use another project dir
    ///     aarkit assemble --include "[a, b]"      Override the include list
    ///     aarkit assemble --json                  Machine-readable summary
    #[command(visible_alias = "a")]
    Assemble {
        /// Project directory (defaults to the current directory)
        #[arg(long, short = 'C')]
        project_dir: Option<PathBuf>,
        /// Include list, overriding aarkit.toml
        #[arg(long, short = 'i')]
        include: Option<String>,
        /// JSON output
        #[arg(long, env = "AARKIT_JSON")]
        json: bool,
    },

    /// Show which configured modules would be assembled
    ///
    /// EXAMPLES:
    ///     aarkit modules                  List modules and skip reasons
    ///     aarkit modules --json           Output as JSON
    #[command(visible_alias = "m")]
    Modules {
        /// Project directory (defaults to the current directory)
        #[arg(long, short = 'C')]
        project_dir: Option<PathBuf>,
        /// Include list, overriding aarkit.toml
        #[arg(long, short = 'i')]
        include: Option<String>,
        /// JSON output
        #[arg(long, env = "AARKIT_JSON")]
        json: bool,
    },

    /// Print the source and output paths of a module
    ///
    /// EXAMPLES:
    ///     aarkit layout core              Human-readable listing
    ///     aarkit layout core --json       Output as JSON
    Layout {
        /// Module name
        module: String,
        /// Project directory (defaults to the current directory)
        #[arg(long, short = 'C')]
        project_dir: Option<PathBuf>,
        /// JSON output
        #[arg(long, env = "AARKIT_JSON")]
        json: bool,
    },

    /// Delete the build directory of every included module
    ///
    /// EXAMPLES:
    ///     aarkit clean                    Clean modules from aarkit.toml
    ///     aarkit clean --include "[core]" Clean a single module
    Clean {
        /// Project directory (defaults to the current directory)
        #[arg(long, short = 'C')]
        project_dir: Option<PathBuf>,
        /// Include list, overriding aarkit.toml
        #[arg(long, short = 'i')]
        include: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cli_config = config::Config::from_env();
    cli_config.apply();

    logging::init(logging::Verbosity::from_flags(cli.verbose, cli.quiet));

    match cli.command {
        Commands::Assemble {
            project_dir,
            include,
            json,
        } => {
            let args = commands::assemble::AssembleArgs {
                project: commands::ProjectArgs {
                    project_dir,
                    include,
                },
                quiet: cli.quiet,
                json,
            };
            commands::assemble::run(args)?;
        }
        Commands::Modules {
            project_dir,
            include,
            json,
        } => {
            let project = commands::ProjectArgs {
                project_dir,
                include,
            };
            commands::modules::run(&project, json)?;
        }
        Commands::Layout {
            module,
            project_dir,
            json,
        } => {
            let project = commands::ProjectArgs {
                project_dir,
                include: None,
            };
            commands::layout::run(&project, &module, json)?;
        }
        Commands::Clean {
            project_dir,
            include,
        } => {
            let project = commands::ProjectArgs {
                project_dir,
                include,
            };
            commands::clean::run(&project, cli.quiet)?;
        }
    }

    Ok(())
}
