//! Identifier-only structure of a view
//!
//! The coordinator starts from the old snapshot's layout and applies every
//! executed command to it, so positions are always resolved against what the
//! view looks like at that instant rather than against either snapshot.

use serde::{Deserialize, Serialize};

/// A section as the view currently holds it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSection {
    pub id: String,
    pub rows: Vec<String>,
}

impl LayoutSection {
    pub fn new(id: impl Into<String>, rows: Vec<String>) -> Self {
        Self {
            id: id.into(),
            rows,
        }
    }

    pub fn row_position(&self, row_id: &str) -> Option<usize> {
        self.rows.iter().position(|r| r == row_id)
    }
}

/// Ordered section/row identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub sections: Vec<LayoutSection>,
}

impl Layout {
    pub fn new(sections: Vec<LayoutSection>) -> Self {
        Self { sections }
    }

    pub fn section_position(&self, section_id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == section_id)
    }

    pub fn contains_section(&self, section_id: &str) -> bool {
        self.section_position(section_id).is_some()
    }

    /// Total number of rows across all sections
    pub fn row_count(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }

    pub(crate) fn insert_section(&mut self, position: usize, section_id: &str) {
        self.sections
            .insert(position, LayoutSection::new(section_id, Vec::new()));
    }

    pub(crate) fn remove_section(&mut self, position: usize) {
        self.sections.remove(position);
    }

    pub(crate) fn insert_row(&mut self, section: usize, position: usize, row_id: &str) {
        self.sections[section].rows.insert(position, row_id.to_string());
    }

    pub(crate) fn remove_row(&mut self, section: usize, position: usize) {
        self.sections[section].rows.remove(position);
    }
}
