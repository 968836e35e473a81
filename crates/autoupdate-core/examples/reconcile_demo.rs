//! Reconciliation Demonstration
//!
//! Walks a small sectioned list through one reconciliation pass.
#![allow(clippy::unwrap_used, clippy::expect_used)]
//!
//! Key concepts illustrated:
//! 1. Diffing two snapshots into unordered commands
//! 2. Delete-friendly ordering
//! 3. Just-in-time resolution seen through an observer
//! 4. One batch transaction per pass

use std::collections::BTreeSet;

use autoupdate_core::{
    compute_commands, delete_friendly_sorted, run_commands, Command, DataSource, IndexPath, Row,
    Section, Snapshot, UpdatableView,
};

struct Inbox {
    folders: Vec<(&'static str, Vec<(&'static str, &'static str)>)>,
}

impl DataSource for Inbox {
    type Content = &'static str;

    fn snapshot(&self) -> Snapshot<&'static str> {
        Snapshot::new(
            self.folders
                .iter()
                .map(|(id, rows)| {
                    Section::new(*id, rows.iter().map(|(r, c)| Row::new(*r, *c)).collect())
                })
                .collect(),
        )
    }
}

struct PrintingView;

impl UpdatableView for PrintingView {
    fn remove_sections(&mut self, sections: &BTreeSet<usize>) {
        println!("    remove_sections {:?}", sections);
    }
    fn insert_sections(&mut self, sections: &BTreeSet<usize>) {
        println!("    insert_sections {:?}", sections);
    }
    fn remove_rows(&mut self, index_paths: &[IndexPath]) {
        println!("    remove_rows {}", index_paths[0]);
    }
    fn insert_rows(&mut self, index_paths: &[IndexPath]) {
        println!("    insert_rows {}", index_paths[0]);
    }
    fn refresh_rows(&mut self, index_paths: &[IndexPath]) {
        println!("    refresh_rows {}", index_paths[0]);
    }
    fn begin_updates(&mut self) {
        println!("  begin_updates");
    }
    fn end_updates(&mut self) {
        println!("  end_updates");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== AutoUpdate Reconciliation Demo ===\n");

    let mut inbox = Inbox {
        folders: vec![
            ("drafts", vec![("d1", "hello")]),
            (
                "inbox",
                vec![("m1", "unread"), ("m2", "unread"), ("m3", "unread")],
            ),
        ],
    };

    // ===== Part 1: Diff and sort =====
    println!("## Part 1: Commands\n");

    let old = inbox.snapshot();
    let mut next = inbox.folders.clone();
    next.remove(0);
    next[0].1.remove(1);
    next[0].1[1].1 = "read";
    next[0].1.push(("m4", "unread"));
    next.push(("archive", vec![("m2", "read")]));

    let new = Inbox {
        folders: next.clone(),
    }
    .snapshot();
    for command in delete_friendly_sorted(&compute_commands(&old, &new)?) {
        println!("  {}", command);
    }

    // ===== Part 2: Execute =====
    println!("\n## Part 2: Execution\n");

    let mut view = PrintingView;
    run_commands(
        &mut inbox,
        &mut view,
        |source| source.folders = next,
        |command: &Command| println!("  -> {}", command),
    )?;

    println!("\n✓ View reconciled with {} folders", inbox.folders.len());
    Ok(())
}
