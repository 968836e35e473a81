//! Diff command
//!
//! Usage: autoupdate diff --old <FILE> --new <FILE>

use clap::Args;
use std::path::PathBuf;

use autoupdate_core::errors::ExError;
use autoupdate_core::{compute_commands, delete_friendly_sort};

use super::{load_snapshot, print_json};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Snapshot the view currently shows
    #[arg(long)]
    pub old: PathBuf,

    /// Snapshot the view should end up showing
    #[arg(long)]
    pub new: PathBuf,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), ExError> {
    let old = load_snapshot(&args.old, "diff")?;
    let new = load_snapshot(&args.new, "diff")?;

    let mut commands =
        compute_commands(&old, &new).map_err(|e| ExError::from(e).with_op("diff"))?;
    delete_friendly_sort(&mut commands);

    print_json(&commands, "diff")
}
