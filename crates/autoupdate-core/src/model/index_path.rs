//! Concrete (section, row) positions

use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete position in a sectioned collection
///
/// Section-level positions carry no row. Row-level positions always do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndexPath {
    pub section: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
}

impl IndexPath {
    /// Position of a whole section
    pub fn section(section: usize) -> Self {
        Self { section, row: None }
    }

    /// Position of a row inside a section
    pub fn row(section: usize, row: usize) -> Self {
        Self {
            section,
            row: Some(row),
        }
    }

    pub fn is_section_level(&self) -> bool {
        self.row.is_none()
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row {
            Some(row) => write!(f, "({}, {})", self.section, row),
            None => write!(f, "({})", self.section),
        }
    }
}
