//! modfix CLI binary entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use modfix::cli::{parse_override_args, run_fix, run_map};

/// Module-metadata maintenance tool for bench-managed apps.
#[derive(Parser)]
#[command(name = "modfix")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Apps root directory (default: current directory)
    #[arg(long, global = true)]
    apps_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Backfill missing module attributes across an app's metadata and fixtures.
    Fix {
        /// App identifier (directory name under the apps root)
        app: String,

        /// Override a map entry: LABEL=NAME (repeatable)
        #[arg(long = "set", value_name = "LABEL=NAME")]
        set: Vec<String>,

        /// JSON file holding an object of LABEL -> NAME overrides
        #[arg(long, value_name = "FILE")]
        overrides: Option<PathBuf>,

        /// Walk and report without writing any file
        #[arg(long)]
        dry_run: bool,

        /// Emit the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the merged module map without touching any file.
    Map {
        /// App identifier (directory name under the apps root)
        app: String,

        /// Override a map entry: LABEL=NAME (repeatable)
        #[arg(long = "set", value_name = "LABEL=NAME")]
        set: Vec<String>,

        /// JSON file holding an object of LABEL -> NAME overrides
        #[arg(long, value_name = "FILE")]
        overrides: Option<PathBuf>,

        /// Emit the map as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let apps_root = cli.apps_root.unwrap_or_else(|| PathBuf::from("."));

    let result = match cli.command {
        Commands::Fix {
            app,
            set,
            overrides,
            dry_run,
            json,
        } => parse_override_args(&set, overrides.as_deref())
            .and_then(|ovr| run_fix(&apps_root, &app, ovr, dry_run, json)),
        Commands::Map {
            app,
            set,
            overrides,
            json,
        } => parse_override_args(&set, overrides.as_deref())
            .and_then(|ovr| run_map(&apps_root, &app, ovr, json)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.error_code().code())
        }
    }
}
