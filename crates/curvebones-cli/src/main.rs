//! curvebones CLI - Command-line interface for curve-to-bone-chain rigging
//!
//! This binary builds hair-style bone chains from the curves in a JSON scene
//! document and qualifies bone names on existing skeletons.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use curvebones_cli::commands;
use curvebones_cli::commands::build::BuildArgs;
use curvebones_cli::commands::rename::RenameArgs;
use curvebones_cli::config::OptionOverrides;

/// curvebones - Bone chains from curves
#[derive(Parser)]
#[command(name = "curvebones")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build one skeleton per curve, one bone chain per spline
    Build {
        /// Path to the scene document (JSON)
        #[arg(short, long)]
        scene: String,

        /// Curve to build (repeatable; default: the selected curves)
        #[arg(long = "object")]
        objects: Vec<String>,

        /// Root each chain at the last point of its spline
        #[arg(short, long)]
        reverse: bool,

        /// Bone name prefix (default: HairBone)
        #[arg(long)]
        prefix: Option<String>,

        /// Prefix every bone with its skeleton name
        #[arg(long)]
        qualify_names: bool,

        /// Path to a JSON file with build options
        #[arg(short, long)]
        config: Option<String>,

        /// Where to write the updated scene (default: overwrite the input)
        #[arg(short, long)]
        output: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Prefix every bone of the given skeletons with the skeleton name
    Rename {
        /// Path to the scene document (JSON)
        #[arg(short, long)]
        scene: String,

        /// Skeleton to rename (repeatable; default: the selected skeletons)
        #[arg(long = "skeleton")]
        skeletons: Vec<String>,

        /// Where to write the updated scene (default: overwrite the input)
        #[arg(short, long)]
        output: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Build {
            scene,
            objects,
            reverse,
            prefix,
            qualify_names,
            config,
            output,
            json,
        } => commands::build::run(&BuildArgs {
            scene: PathBuf::from(scene),
            objects,
            config: config.map(PathBuf::from),
            overrides: OptionOverrides {
                reverse,
                prefix,
                qualify_names,
            },
            output: output.map(PathBuf::from),
            json,
        }),
        Commands::Rename {
            scene,
            skeletons,
            output,
            json,
        } => commands::rename::run(&RenameArgs {
            scene: PathBuf::from(scene),
            skeletons,
            output: output.map(PathBuf::from),
            json,
        }),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
