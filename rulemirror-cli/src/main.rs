//! rulemirror — keep coding-agent rule files in sync.
//!
//! # Usage
//!
//! ```text
//! rulemirror init [--force] [--user]
//! rulemirror paths list|add <path>|remove <path>
//! rulemirror status [--json]
//! rulemirror show
//! rulemirror sync [--from <file> | --stdin] [--dry-run] [--atomic]
//! rulemirror diff [--from <file>]
//! ```
//!
//! Every command takes `--root <dir>` (default: current directory) and
//! `-v`/`-vv` for log output on stderr.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use commands::{
    diff::DiffArgs, init::InitArgs, paths::PathsCommand, show::ShowArgs, status::StatusArgs,
    sync::SyncArgs, Workspace,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "rulemirror",
    version,
    about = "Mirror one set of coding-agent instructions across every rule file",
    long_about = None,
)]
struct Cli {
    /// Workspace root the rule file paths are relative to.
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a `.rulemirror.yaml` with the default rule file list.
    Init(InitArgs),

    /// Inspect or edit the ordered rule file list.
    Paths {
        #[command(subcommand)]
        command: PathsCommand,
    },

    /// Show existence, modification time and drift of every rule file.
    Status(StatusArgs),

    /// Print the authoritative rule file content.
    Show(ShowArgs),

    /// Write one document to every configured rule file.
    Sync(SyncArgs),

    /// Show unified diffs of what sync would change.
    Diff(DiffArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let workspace = Workspace::open(cli.root)?;
    match cli.command {
        Commands::Init(args) => args.run(&workspace),
        Commands::Paths { command } => commands::paths::run(command, &workspace),
        Commands::Status(args) => args.run(&workspace),
        Commands::Show(args) => args.run(&workspace),
        Commands::Sync(args) => args.run(&workspace),
        Commands::Diff(args) => args.run(&workspace),
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
