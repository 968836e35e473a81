//! Immutable snapshots of a sectioned collection
//!
//! A [`Snapshot`] is an ordered list of [`Section`]s, each owning an ordered
//! list of [`Row`]s. Identity is by identifier only: a row keeps its id when
//! its content or position changes. Row content is compared with `PartialEq`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::{AutoUpdateError, Result};
use crate::model::layout::{Layout, LayoutSection};

/// One row: a stable identifier plus the content used for equality checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row<C> {
    id: String,
    content: C,
}

impl<C> Row<C> {
    pub fn new(id: impl Into<String>, content: C) -> Self {
        Self {
            id: id.into(),
            content,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &C {
        &self.content
    }
}

/// One section: a stable identifier and its ordered rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section<C> {
    id: String,
    #[serde(default = "Vec::new")]
    rows: Vec<Row<C>>,
}

impl<C> Section<C> {
    pub fn new(id: impl Into<String>, rows: Vec<Row<C>>) -> Self {
        Self {
            id: id.into(),
            rows,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rows(&self) -> &[Row<C>] {
        &self.rows
    }

    /// Position of a row in this section, by identifier
    pub fn row_position(&self, row_id: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.id == row_id)
    }

    pub fn row(&self, row_id: &str) -> Option<&Row<C>> {
        self.rows.iter().find(|r| r.id == row_id)
    }
}

/// Ordered sections-of-rows state captured at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<C> {
    #[serde(default = "Vec::new")]
    sections: Vec<Section<C>>,
}

impl<C> Default for Snapshot<C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<C> Snapshot<C> {
    pub fn new(sections: Vec<Section<C>>) -> Self {
        Self { sections }
    }

    /// A snapshot with zero sections
    pub fn empty() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    pub fn sections(&self) -> &[Section<C>] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn section(&self, section_id: &str) -> Option<&Section<C>> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    /// Position of a section in this snapshot, by identifier
    pub fn section_position(&self, section_id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == section_id)
    }

    /// Check identifier uniqueness: section ids across the snapshot, row ids
    /// within each section.
    ///
    /// `which` names the snapshot ("old"/"new") in the returned error.
    ///
    /// # Errors
    ///
    /// * `DuplicateSection` - two sections share an identifier
    /// * `DuplicateRow` - two rows of one section share an identifier
    pub fn validate(&self, which: &'static str) -> Result<()> {
        let mut section_ids: BTreeSet<&str> = BTreeSet::new();
        for section in &self.sections {
            if !section_ids.insert(section.id.as_str()) {
                return Err(AutoUpdateError::DuplicateSection {
                    snapshot: which,
                    section_id: section.id.clone(),
                });
            }

            let mut row_ids: BTreeSet<&str> = BTreeSet::new();
            for row in &section.rows {
                if !row_ids.insert(row.id.as_str()) {
                    return Err(AutoUpdateError::DuplicateRow {
                        snapshot: which,
                        section_id: section.id.clone(),
                        row_id: row.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Identifier-only structure of this snapshot
    pub fn layout(&self) -> Layout {
        Layout::new(
            self.sections
                .iter()
                .map(|s| LayoutSection::new(&s.id, s.rows.iter().map(|r| r.id.clone()).collect()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(sections: &[(&str, &[&str])]) -> Snapshot<u32> {
        Snapshot::new(
            sections
                .iter()
                .map(|(id, rows)| Section::new(*id, rows.iter().map(|r| Row::new(*r, 0)).collect()))
                .collect(),
        )
    }

    #[test]
    fn test_positions_by_identifier() {
        let snap = snapshot(&[("a", &["r1", "r2"]), ("b", &["r3"])]);
        assert_eq!(snap.section_position("b"), Some(1));
        assert_eq!(snap.section("a").unwrap().row_position("r2"), Some(1));
        assert_eq!(snap.section_position("zzz"), None);
    }

    #[test]
    fn test_validate_rejects_duplicate_section() {
        let snap = snapshot(&[("a", &[]), ("a", &[])]);
        let err = snap.validate("old").unwrap_err();
        assert!(matches!(
            err,
            AutoUpdateError::DuplicateSection { snapshot: "old", ref section_id } if section_id == "a"
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_row_within_section() {
        let snap = snapshot(&[("a", &["r1", "r1"])]);
        assert!(matches!(
            snap.validate("new"),
            Err(AutoUpdateError::DuplicateRow { .. })
        ));
    }

    #[test]
    fn test_same_row_id_in_different_sections_is_valid() {
        let snap = snapshot(&[("a", &["r1"]), ("b", &["r1"])]);
        assert!(snap.validate("new").is_ok());
    }

    #[test]
    fn test_deserialize_defaults_missing_rows() {
        let snap: Snapshot<serde_json::Value> =
            serde_json::from_str(r#"{"sections":[{"id":"a"}]}"#).unwrap();
        assert_eq!(snap.section_count(), 1);
        assert!(snap.sections()[0].rows().is_empty());
    }
}
