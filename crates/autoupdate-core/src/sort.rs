//! Delete-friendly ordering
//!
//! Orders positions from the highest section/highest row down to the lowest.
//! Removing elements in this order never shifts an element that has not been
//! processed yet. The same order is used for every command kind, so the
//! pipeline has a single ordering rule.
//!
//! ## Tie-breaking
//!
//! - A section-level entry sorts as if its row were above every row of that
//!   section, so `AddSection` precedes the `AddRow`s that fill it.
//! - Equal positions then break by command kind (removals first), section
//!   identifier, and row identifier. Sorting is deterministic and idempotent.

use std::cmp::Ordering;

use crate::commands::Command;
use crate::errors::{AutoUpdateError, Result};
use crate::model::IndexPath;

/// Ordering key extracted from anything that carries a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey<'a> {
    pub section: usize,
    /// `usize::MAX` for section-level entries
    pub row: usize,
    pub rank: u8,
    pub section_id: &'a str,
    pub row_id: &'a str,
}

impl SortKey<'_> {
    /// Descending (section, row), then ascending tie-breakers
    pub fn delete_friendly_cmp(&self, other: &Self) -> Ordering {
        other
            .section
            .cmp(&self.section)
            .then(other.row.cmp(&self.row))
            .then(self.rank.cmp(&other.rank))
            .then(self.section_id.cmp(other.section_id))
            .then(self.row_id.cmp(other.row_id))
    }
}

/// Anything the sorter can order
pub trait DeleteFriendly {
    fn sort_key(&self) -> SortKey<'_>;
}

impl DeleteFriendly for IndexPath {
    fn sort_key(&self) -> SortKey<'_> {
        SortKey {
            section: self.section,
            row: self.row.unwrap_or(usize::MAX),
            rank: 0,
            section_id: "",
            row_id: "",
        }
    }
}

impl DeleteFriendly for Command {
    fn sort_key(&self) -> SortKey<'_> {
        let path = self.provisional_index_path();
        SortKey {
            section: path.section,
            row: path.row.unwrap_or(usize::MAX),
            rank: self.command_type().rank(),
            section_id: self.section_identifier(),
            row_id: self.row_identifier().unwrap_or(""),
        }
    }
}

/// Sort in place into delete-friendly order
pub fn delete_friendly_sort<T: DeleteFriendly>(items: &mut [T]) {
    items.sort_by(|a, b| a.sort_key().delete_friendly_cmp(&b.sort_key()));
}

/// Return a new, delete-friendly sorted sequence
pub fn delete_friendly_sorted<T: DeleteFriendly + Clone>(items: &[T]) -> Vec<T> {
    let mut sorted = items.to_vec();
    delete_friendly_sort(&mut sorted);
    sorted
}

/// True if `items` is already in delete-friendly order
pub fn is_delete_friendly<T: DeleteFriendly>(items: &[T]) -> bool {
    items.windows(2).all(|pair| {
        pair[0].sort_key().delete_friendly_cmp(&pair[1].sort_key()) != Ordering::Greater
    })
}

/// A positional reference whose concrete type is only known at runtime
///
/// Lets callers hold raw index paths and commands in one collection. Only
/// homogeneous collections can be sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionRef {
    IndexPath(IndexPath),
    Command(Command),
}

impl PositionRef {
    fn type_name(&self) -> &'static str {
        match self {
            PositionRef::IndexPath(_) => "index path",
            PositionRef::Command(_) => "command",
        }
    }
}

impl DeleteFriendly for PositionRef {
    fn sort_key(&self) -> SortKey<'_> {
        match self {
            PositionRef::IndexPath(path) => path.sort_key(),
            PositionRef::Command(cmd) => cmd.sort_key(),
        }
    }
}

/// Delete-friendly sort over runtime-typed references
///
/// # Errors
///
/// * `MixedPositionRefs` - the slice holds both index paths and commands
pub fn delete_friendly_sorted_refs(items: &[PositionRef]) -> Result<Vec<PositionRef>> {
    if let Some(first) = items.first() {
        let first_name = first.type_name();
        if let Some(other) = items.iter().find(|i| i.type_name() != first_name) {
            return Err(AutoUpdateError::MixedPositionRefs {
                first: first_name,
                second: other.type_name(),
            });
        }
    }
    Ok(delete_friendly_sorted(items))
}
