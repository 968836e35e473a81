//! Command computation.
//!
//! The core entry point is [`compute_commands`], which accepts two snapshots
//! and produces the unordered command set between them.

use std::collections::{BTreeSet, HashMap};
use std::time::Instant;

use crate::commands::Command;
use crate::errors::Result;
use crate::model::{Row, Section, Snapshot};
use crate::{log_op_end, log_op_error, log_op_start};

/// Split two identifier lists into (only in old, in both, only in new).
fn id_delta<'a>(
    old: impl Iterator<Item = &'a str>,
    new: impl Iterator<Item = &'a str>,
) -> (BTreeSet<&'a str>, BTreeSet<&'a str>, BTreeSet<&'a str>) {
    let old: BTreeSet<&str> = old.collect();
    let new: BTreeSet<&str> = new.collect();
    let removed = old.difference(&new).copied().collect();
    let kept = old.intersection(&new).copied().collect();
    let added = new.difference(&old).copied().collect();
    (removed, kept, added)
}

/// Row-level diff of one section present in both snapshots.
///
/// A row that only changed position is not reported. It stays where the view
/// has it and only moves as a side effect of the adds and removes around it.
fn diff_rows<C: PartialEq>(
    old_section: &Section<C>,
    old_position: usize,
    new_section: &Section<C>,
    new_position: usize,
    commands: &mut Vec<Command>,
) {
    let section_id = old_section.id();
    let (removed, kept, added) = id_delta(
        old_section.rows().iter().map(|r| r.id()),
        new_section.rows().iter().map(|r| r.id()),
    );
    let new_rows: HashMap<&str, &Row<C>> =
        new_section.rows().iter().map(|r| (r.id(), r)).collect();

    for (row, old_row) in old_section.rows().iter().enumerate() {
        if removed.contains(old_row.id()) {
            commands.push(Command::remove_row(
                section_id,
                old_position,
                old_row.id(),
                row,
            ));
        } else if kept.contains(old_row.id()) {
            let changed = new_rows
                .get(old_row.id())
                .is_some_and(|new_row| new_row.content() != old_row.content());
            if changed {
                commands.push(Command::update_row(
                    section_id,
                    old_position,
                    old_row.id(),
                    row,
                ));
            }
        }
    }

    for (row, new_row) in new_section.rows().iter().enumerate() {
        if added.contains(new_row.id()) {
            commands.push(Command::add_row(
                section_id,
                new_position,
                new_row.id(),
                row,
            ));
        }
    }
}

/// Compute the commands that transform `old` into `new`.
///
/// Sections only in `old` yield `RemoveSection`; their rows leave with them.
/// Sections only in `new` yield `AddSection` followed by an `AddRow` per row,
/// since an inserted section starts out empty. Sections in both are diffed row
/// by row. Removals and updates carry old-snapshot positions, adds carry
/// new-snapshot positions. The returned order is unspecified.
///
/// # Errors
///
/// * `DuplicateSection` / `DuplicateRow` - either snapshot reuses an identifier
pub fn compute_commands<C: PartialEq>(old: &Snapshot<C>, new: &Snapshot<C>) -> Result<Vec<Command>> {
    let start = Instant::now();
    log_op_start!(
        "compute_commands",
        old_section_count = old.section_count(),
        new_section_count = new.section_count()
    );

    if let Err(err) = old.validate("old").and_then(|_| new.validate("new")) {
        log_op_error!(
            "compute_commands",
            err.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        return Err(err);
    }

    // Fast-path: structurally identical snapshots
    if old == new {
        log_op_end!(
            "compute_commands",
            duration_ms = start.elapsed().as_millis() as u64,
            command_count = 0usize
        );
        return Ok(Vec::new());
    }

    let mut commands = Vec::new();
    let (removed, _, added) = id_delta(
        old.sections().iter().map(|s| s.id()),
        new.sections().iter().map(|s| s.id()),
    );

    for (old_position, old_section) in old.sections().iter().enumerate() {
        if removed.contains(old_section.id()) {
            commands.push(Command::remove_section(old_section.id(), old_position));
            continue;
        }
        if let Some(new_position) = new.section_position(old_section.id()) {
            diff_rows(
                old_section,
                old_position,
                &new.sections()[new_position],
                new_position,
                &mut commands,
            );
        }
    }

    for (new_position, new_section) in new.sections().iter().enumerate() {
        if added.contains(new_section.id()) {
            commands.push(Command::add_section(new_section.id(), new_position));
            for (row, new_row) in new_section.rows().iter().enumerate() {
                commands.push(Command::add_row(
                    new_section.id(),
                    new_position,
                    new_row.id(),
                    row,
                ));
            }
        }
    }

    log_op_end!(
        "compute_commands",
        duration_ms = start.elapsed().as_millis() as u64,
        command_count = commands.len()
    );
    Ok(commands)
}
