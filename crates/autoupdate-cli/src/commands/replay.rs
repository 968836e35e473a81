//! Replay command
//!
//! Usage: autoupdate replay --old <FILE> --new <FILE>
//!
//! Diffs, sorts and executes the commands from the old to the new snapshot
//! against a view that only records its primitive calls, then prints the
//! resolved commands, the calls and the resulting layout.

use clap::Args;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

use autoupdate_core::errors::ExError;
use autoupdate_core::{
    compute_commands, delete_friendly_sort, execute_commands, Command, IndexPath, Layout,
    UpdatableView,
};

use super::{load_snapshot, print_json};

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Snapshot the view currently shows
    #[arg(long)]
    pub old: PathBuf,

    /// Snapshot the view should end up showing
    #[arg(long)]
    pub new: PathBuf,
}

/// View that logs every call it receives
#[derive(Default)]
struct RecordingView {
    calls: Vec<String>,
}

impl RecordingView {
    fn paths(index_paths: &[IndexPath]) -> String {
        index_paths
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl UpdatableView for RecordingView {
    fn remove_sections(&mut self, sections: &BTreeSet<usize>) {
        self.calls.push(format!("remove_sections {:?}", sections));
    }

    fn insert_sections(&mut self, sections: &BTreeSet<usize>) {
        self.calls.push(format!("insert_sections {:?}", sections));
    }

    fn remove_rows(&mut self, index_paths: &[IndexPath]) {
        self.calls
            .push(format!("remove_rows {}", Self::paths(index_paths)));
    }

    fn insert_rows(&mut self, index_paths: &[IndexPath]) {
        self.calls
            .push(format!("insert_rows {}", Self::paths(index_paths)));
    }

    fn refresh_rows(&mut self, index_paths: &[IndexPath]) {
        self.calls
            .push(format!("refresh_rows {}", Self::paths(index_paths)));
    }

    fn begin_updates(&mut self) {
        self.calls.push("begin_updates".to_string());
    }

    fn end_updates(&mut self) {
        self.calls.push("end_updates".to_string());
    }
}

#[derive(Serialize)]
struct ReplayReport {
    commands: Vec<Command>,
    calls: Vec<String>,
    layout: Layout,
}

/// Execute replay command
pub fn execute(args: ReplayArgs) -> Result<(), ExError> {
    let old = load_snapshot(&args.old, "replay")?;
    let new = load_snapshot(&args.new, "replay")?;

    let mut commands =
        compute_commands(&old, &new).map_err(|e| ExError::from(e).with_op("replay"))?;
    delete_friendly_sort(&mut commands);

    let mut view = RecordingView::default();
    let mut resolved = Vec::with_capacity(commands.len());
    let layout = execute_commands(&old, &new, commands, &mut view, |c: &Command| {
        resolved.push(c.clone())
    })
    .map_err(|e| ExError::from(e).with_op("replay"))?;

    print_json(
        &ReplayReport {
            commands: resolved,
            calls: view.calls,
            layout,
        },
        "replay",
    )
}
