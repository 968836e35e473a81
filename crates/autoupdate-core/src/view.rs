//! Collaborator contracts: the data source, the target view, and the
//! per-command observer
//!
//! The core never renders or stores anything. It reads snapshots from a
//! [`DataSource`] and drives an [`UpdatableView`] through primitive calls
//! grouped in one [`BatchTransaction`].

use std::collections::BTreeSet;

use crate::commands::Command;
use crate::model::{IndexPath, Snapshot};

/// Supplies snapshots of the caller's backing model on demand
pub trait DataSource {
    /// Row content type; compared with `PartialEq` to detect updates
    type Content: PartialEq;

    /// Capture the current state
    fn snapshot(&self) -> Snapshot<Self::Content>;
}

/// A list/grid view that accepts primitive structural mutations
///
/// Calls made between `begin_updates` and `end_updates` are expected to be
/// coalesced by the implementation into a single visible update. Callers do
/// not invoke `begin_updates`/`end_updates` directly; they open a
/// [`BatchTransaction`].
pub trait UpdatableView {
    fn remove_sections(&mut self, sections: &BTreeSet<usize>);
    fn insert_sections(&mut self, sections: &BTreeSet<usize>);

    fn remove_rows(&mut self, index_paths: &[IndexPath]);
    fn insert_rows(&mut self, index_paths: &[IndexPath]);
    fn refresh_rows(&mut self, index_paths: &[IndexPath]);

    fn begin_updates(&mut self);
    fn end_updates(&mut self);
}

/// Scoped batch on an [`UpdatableView`]
///
/// Opening the guard calls `begin_updates`; dropping it calls `end_updates`,
/// on every exit path including early returns and unwinding. The view is
/// mutably borrowed for the guard's lifetime, so two batches can never
/// overlap on one view.
pub struct BatchTransaction<'v, V: UpdatableView + ?Sized> {
    view: &'v mut V,
}

impl<'v, V: UpdatableView + ?Sized> BatchTransaction<'v, V> {
    pub fn open(view: &'v mut V) -> Self {
        view.begin_updates();
        tracing::trace!(component = module_path!(), "batch transaction opened");
        Self { view }
    }

    /// The view, for primitive calls inside the batch
    pub fn view(&mut self) -> &mut V {
        &mut *self.view
    }
}

impl<V: UpdatableView + ?Sized> Drop for BatchTransaction<'_, V> {
    fn drop(&mut self) {
        self.view.end_updates();
        tracing::trace!(component = module_path!(), "batch transaction closed");
    }
}

/// Receives each command right before its primitive mutation executes
///
/// `resolved_index_path` is always `Some` when `will_execute` is called.
pub trait CommandObserver {
    fn will_execute(&mut self, command: &Command);
}

impl<F: FnMut(&Command)> CommandObserver for F {
    fn will_execute(&mut self, command: &Command) {
        self(command)
    }
}

/// Observer that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CommandObserver for NoopObserver {
    fn will_execute(&mut self, _command: &Command) {}
}
