//! Command execution coordinator
//!
//! [`run_commands`] is the single entry point for reconciling a view with its
//! data source:
//!
//! 1. capture the old snapshot
//! 2. let the caller switch its model to the new state
//! 3. capture the new snapshot, diff, sort
//! 4. open one batch transaction on the view
//! 5. per command: resolve its index path, notify the observer, perform the
//!    primitive mutation
//! 6. close the batch
//!
//! ## Atomicity Contract
//!
//! - **One batch**: every primitive call happens inside a single
//!   [`BatchTransaction`], which is closed on every exit path.
//! - **Loud failure**: a command that cannot be resolved aborts the pass with
//!   an error. Nothing is skipped and nothing is retried.
//! - **Resolved notifications**: the observer always sees a command whose
//!   `resolved_index_path` is set, and that path is the one the primitive
//!   call receives next.
//!
//! ## Example
//!
//! ```
//! use std::collections::BTreeSet;
//! use autoupdate_core::apply::run_commands;
//! use autoupdate_core::model::{IndexPath, Row, Section, Snapshot};
//! use autoupdate_core::view::{DataSource, NoopObserver, UpdatableView};
//!
//! struct Model(Vec<&'static str>);
//!
//! impl DataSource for Model {
//!     type Content = ();
//!     fn snapshot(&self) -> Snapshot<()> {
//!         let rows = self.0.iter().map(|id| Row::new(*id, ())).collect();
//!         Snapshot::new(vec![Section::new("main", rows)])
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Log(Vec<String>);
//!
//! impl UpdatableView for Log {
//!     fn remove_sections(&mut self, s: &BTreeSet<usize>) { self.0.push(format!("-s{:?}", s)) }
//!     fn insert_sections(&mut self, s: &BTreeSet<usize>) { self.0.push(format!("+s{:?}", s)) }
//!     fn remove_rows(&mut self, p: &[IndexPath]) { self.0.push(format!("-r{}", p[0])) }
//!     fn insert_rows(&mut self, p: &[IndexPath]) { self.0.push(format!("+r{}", p[0])) }
//!     fn refresh_rows(&mut self, p: &[IndexPath]) { self.0.push(format!("~r{}", p[0])) }
//!     fn begin_updates(&mut self) { self.0.push("begin".into()) }
//!     fn end_updates(&mut self) { self.0.push("end".into()) }
//! }
//!
//! let mut model = Model(vec!["r1", "r2", "r3"]);
//! let mut view = Log::default();
//! run_commands(&mut model, &mut view, |m| m.0.retain(|id| *id != "r2"), NoopObserver).unwrap();
//! assert_eq!(view.0, vec!["begin", "-r(0, 1)", "end"]);
//! ```

use std::collections::BTreeSet;
use std::time::Instant;

use autoupdate_core_types::schema::EVENT_COMMAND;
use autoupdate_core_types::RequestId;

use crate::commands::{Command, CommandType};
use crate::diff::compute_commands;
use crate::errors::Result;
use crate::model::{IndexPath, Layout, Snapshot};
use crate::resolve::Resolver;
use crate::sort::delete_friendly_sort;
use crate::view::{BatchTransaction, CommandObserver, DataSource, UpdatableView};
use crate::{log_op_end, log_op_error, log_op_start};

/// Reconcile `view` with `data_source` across the caller's `update`.
///
/// `update` is the caller's hook to switch its backing model to the new
/// state; after it returns, `data_source` must report the new snapshot.
/// `observer` is told about each command immediately before its primitive
/// mutation.
///
/// # Errors
///
/// * Identity violations (`DuplicateSection`, `DuplicateRow`) from diffing;
///   these abort before the batch opens
/// * Resolution violations (`SectionNotFound`, `RowNotFound`,
///   `TargetAlreadyPresent`, `IndexPathAlreadyResolved`); these abort inside
///   the batch, which is still closed
pub fn run_commands<D, V, U, O>(
    data_source: &mut D,
    view: &mut V,
    update: U,
    observer: O,
) -> Result<()>
where
    D: DataSource,
    V: UpdatableView + ?Sized,
    U: FnOnce(&mut D),
    O: CommandObserver,
{
    let request_id = RequestId::new();
    let start = Instant::now();
    log_op_start!("run_commands", request_id = %request_id);

    let old = data_source.snapshot();
    update(data_source);
    let new = data_source.snapshot();

    let result = compute_commands(&old, &new).and_then(|mut commands| {
        delete_friendly_sort(&mut commands);
        let count = commands.len();
        execute_commands(&old, &new, commands, view, observer).map(|_| count)
    });

    match result {
        Ok(count) => {
            log_op_end!(
                "run_commands",
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = %request_id,
                command_count = count
            );
            Ok(())
        }
        Err(err) => {
            log_op_error!(
                "run_commands",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = %request_id
            );
            Err(err)
        }
    }
}

/// Execute `commands`, in the order given, against `view` in one batch.
///
/// Positions are resolved against a working layout that starts at `old` and
/// follows every executed command; inserts are placed relative to `new`.
/// Pass commands in delete-friendly order (see [`crate::sort`]).
///
/// Returns the final layout, which equals `new.layout()` whenever the command
/// set came from diffing `old` against `new` and no row merely changed
/// position.
///
/// # Errors
///
/// * `SectionNotFound` / `RowNotFound` - a target is missing from the layout
/// * `TargetAlreadyPresent` - an insert targets an identifier already shown
/// * `IndexPathAlreadyResolved` - a command was resolved before, elsewhere
pub fn execute_commands<C, V, O>(
    old: &Snapshot<C>,
    new: &Snapshot<C>,
    commands: Vec<Command>,
    view: &mut V,
    mut observer: O,
) -> Result<Layout>
where
    V: UpdatableView + ?Sized,
    O: CommandObserver,
{
    let mut resolver = Resolver::new(old.layout(), new);
    let mut batch = BatchTransaction::open(view);

    for mut command in commands {
        let index_path = resolver.resolve(&command)?;
        command.resolve(index_path)?;

        tracing::debug!(
            component = module_path!(),
            op = "execute_commands",
            event = EVENT_COMMAND,
            command_type = command.command_type().name(),
            section_id = command.section_identifier(),
            row_id = command.row_identifier().unwrap_or_default(),
            index_path = %index_path,
        );

        observer.will_execute(&command);
        perform(batch.view(), &command, index_path);
        resolver.apply(&command, index_path);
    }

    drop(batch);
    Ok(resolver.into_layout())
}

/// Issue the single primitive call matching `command`
fn perform<V: UpdatableView + ?Sized>(view: &mut V, command: &Command, index_path: IndexPath) {
    match command.command_type() {
        CommandType::AddSection => view.insert_sections(&BTreeSet::from([index_path.section])),
        CommandType::RemoveSection => {
            view.remove_sections(&BTreeSet::from([index_path.section]))
        }
        CommandType::AddRow { .. } => view.insert_rows(&[index_path]),
        CommandType::RemoveRow { .. } => view.remove_rows(&[index_path]),
        CommandType::UpdateRow { .. } => view.refresh_rows(&[index_path]),
    }
}
