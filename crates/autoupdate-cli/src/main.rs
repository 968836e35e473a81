//! AutoUpdate CLI
//!
//! Diff and replay JSON snapshot files through the reconciliation pipeline

use clap::{Parser, Subcommand, ValueEnum};

use autoupdate_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "autoupdate")]
#[command(about = "AutoUpdate - reconcile sectioned collection snapshots", long_about = None)]
struct Cli {
    /// Enable logging to stderr in the given format
    #[arg(long, global = true, value_enum)]
    log: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    /// Human-readable, includes per-command events
    Dev,
    /// JSON lines
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the delete-friendly sorted commands between two snapshots
    Diff(commands::diff::DiffArgs),
    /// Execute the commands against a recording view and print the result
    Replay(commands::replay::ReplayArgs),
}

fn main() {
    let cli = Cli::parse();

    match cli.log {
        Some(LogFormat::Dev) => init(Profile::Development),
        Some(LogFormat::Json) => init(Profile::Production),
        None => {}
    }

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Replay(args) => commands::replay::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
