//! AutoUpdate Core - reconcile sectioned collection views with their data
//!
//! This crate turns two snapshots of a sectioned, ordered collection into the
//! mutation commands that take a list/grid view from one to the other, and
//! executes them as a single batch:
//! - Immutable snapshot model with identity checks
//! - Identity-based diff engine (sections and rows; add/remove/update)
//! - Delete-friendly ordering of commands and index paths
//! - Execution coordinator with just-in-time position resolution inside one
//!   scoped batch transaction
//!
//! Rendering, layout and animation belong to the view behind
//! [`view::UpdatableView`]; snapshots come from a [`view::DataSource`].

pub mod apply;
pub mod commands;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
mod resolve;
pub mod sort;
pub mod view;

// Re-export commonly used types
pub use apply::{execute_commands, run_commands};
pub use commands::{Command, CommandType};
pub use diff::compute_commands;
pub use errors::{AutoUpdateError, ExError, ExErrorKind, Result};
pub use model::{IndexPath, Layout, Row, Section, Snapshot};
pub use sort::{delete_friendly_sort, delete_friendly_sorted, DeleteFriendly, PositionRef};
pub use view::{BatchTransaction, CommandObserver, DataSource, NoopObserver, UpdatableView};
