//! Snapshot diff engine.
//!
//! Compares an old and a new [`Snapshot`](crate::model::Snapshot) by identity
//! and produces the commands that turn a view showing the old one into a view
//! showing the new one.
//!
//! ## Entry point
//!
//! ```
//! use autoupdate_core::diff::compute_commands;
//! use autoupdate_core::model::{Row, Section, Snapshot};
//!
//! let old = Snapshot::new(vec![Section::new("a", vec![Row::new("r1", 1)])]);
//! let new = Snapshot::new(vec![Section::new("a", vec![Row::new("r1", 2)])]);
//!
//! let commands = compute_commands(&old, &new).unwrap();
//! assert_eq!(commands.len(), 1);
//! ```
//!
//! ## Guarantees
//!
//! - **Identity first**: both snapshots are checked for duplicate identifiers
//!   before any command is produced.
//! - **No moves**: a row found in both snapshots with equal content yields
//!   nothing, whatever its position.
//! - **Unordered output**: callers sort with [`crate::sort`] before execution.

pub mod engine;

pub use engine::compute_commands;
