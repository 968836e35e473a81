//! Collection model
//!
//! Snapshots are captured once from the data source and never mutated. The
//! coordinator tracks the view's evolving structure as a [`Layout`], which
//! holds identifiers only.

pub mod index_path;
pub mod layout;
pub mod snapshot;

pub use index_path::IndexPath;
pub use layout::{Layout, LayoutSection};
pub use snapshot::{Row, Section, Snapshot};
