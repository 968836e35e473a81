//! Mutation commands produced by the diff engine
//!
//! A [`Command`] describes one mutation of the view. Its positions are
//! provisional until the coordinator resolves them just before the matching
//! primitive call; from then on `resolved_index_path` is fixed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{AutoUpdateError, Result};
use crate::model::IndexPath;

/// The five mutation kinds
///
/// Row-level kinds carry the provisional row position: the row's position in
/// the old snapshot for removals and updates, in the new snapshot for adds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandType {
    AddSection,
    RemoveSection,
    AddRow { row: usize },
    RemoveRow { row: usize },
    UpdateRow { row: usize },
}

impl CommandType {
    /// Provisional row position, `None` for section-level kinds
    pub fn row(&self) -> Option<usize> {
        match self {
            CommandType::AddSection | CommandType::RemoveSection => None,
            CommandType::AddRow { row }
            | CommandType::RemoveRow { row }
            | CommandType::UpdateRow { row } => Some(*row),
        }
    }

    pub fn is_section_level(&self) -> bool {
        self.row().is_none()
    }

    pub fn is_removal(&self) -> bool {
        matches!(
            self,
            CommandType::RemoveSection | CommandType::RemoveRow { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            CommandType::AddSection => "add_section",
            CommandType::RemoveSection => "remove_section",
            CommandType::AddRow { .. } => "add_row",
            CommandType::RemoveRow { .. } => "remove_row",
            CommandType::UpdateRow { .. } => "update_row",
        }
    }

    /// Tie-break rank used by the sorter; removals first
    pub(crate) fn rank(&self) -> u8 {
        match self {
            CommandType::RemoveSection => 0,
            CommandType::RemoveRow { .. } => 1,
            CommandType::UpdateRow { .. } => 2,
            CommandType::AddSection => 3,
            CommandType::AddRow { .. } => 4,
        }
    }
}

/// One mutation of the view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    command_type: CommandType,
    section_identifier: String,
    /// Section position in the snapshot the command was derived from
    section: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    row_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolved_index_path: Option<IndexPath>,
}

impl Command {
    /// Insert the section `section_id`, found at `section` in the new snapshot
    pub fn add_section(section_id: impl Into<String>, section: usize) -> Self {
        Self::new(CommandType::AddSection, section_id.into(), section, None)
    }

    /// Remove the section `section_id`, found at `section` in the old snapshot
    pub fn remove_section(section_id: impl Into<String>, section: usize) -> Self {
        Self::new(CommandType::RemoveSection, section_id.into(), section, None)
    }

    /// Insert `row_id`, found at (`section`, `row`) in the new snapshot
    pub fn add_row(
        section_id: impl Into<String>,
        section: usize,
        row_id: impl Into<String>,
        row: usize,
    ) -> Self {
        Self::new(
            CommandType::AddRow { row },
            section_id.into(),
            section,
            Some(row_id.into()),
        )
    }

    /// Remove `row_id`, found at (`section`, `row`) in the old snapshot
    pub fn remove_row(
        section_id: impl Into<String>,
        section: usize,
        row_id: impl Into<String>,
        row: usize,
    ) -> Self {
        Self::new(
            CommandType::RemoveRow { row },
            section_id.into(),
            section,
            Some(row_id.into()),
        )
    }

    /// Refresh `row_id`, found at (`section`, `row`) in the old snapshot
    pub fn update_row(
        section_id: impl Into<String>,
        section: usize,
        row_id: impl Into<String>,
        row: usize,
    ) -> Self {
        Self::new(
            CommandType::UpdateRow { row },
            section_id.into(),
            section,
            Some(row_id.into()),
        )
    }

    fn new(
        command_type: CommandType,
        section_identifier: String,
        section: usize,
        row_identifier: Option<String>,
    ) -> Self {
        Self {
            command_type,
            section_identifier,
            section,
            row_identifier,
            resolved_index_path: None,
        }
    }

    pub fn command_type(&self) -> CommandType {
        self.command_type
    }

    pub fn section_identifier(&self) -> &str {
        &self.section_identifier
    }

    /// Provisional row position (row-level commands only)
    pub fn row(&self) -> Option<usize> {
        self.command_type.row()
    }

    pub fn row_identifier(&self) -> Option<&str> {
        self.row_identifier.as_deref()
    }

    /// Position derived from the snapshot this command came from. Used for
    /// ordering only, never for execution.
    pub fn provisional_index_path(&self) -> IndexPath {
        IndexPath {
            section: self.section,
            row: self.row(),
        }
    }

    /// `None` until the coordinator resolves the command
    pub fn resolved_index_path(&self) -> Option<IndexPath> {
        self.resolved_index_path
    }

    /// Fix the concrete position this command executes at.
    ///
    /// Resolving again to the same path is a no-op.
    ///
    /// # Errors
    ///
    /// * `IndexPathAlreadyResolved` - the command is already fixed to another path
    pub(crate) fn resolve(&mut self, index_path: IndexPath) -> Result<IndexPath> {
        match self.resolved_index_path {
            Some(existing) if existing != index_path => {
                Err(AutoUpdateError::IndexPathAlreadyResolved {
                    section_id: self.section_identifier.clone(),
                    existing,
                    requested: index_path,
                })
            }
            _ => {
                self.resolved_index_path = Some(index_path);
                Ok(index_path)
            }
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}", self.command_type.name(), self.section_identifier)?;
        if let (Some(row_id), Some(row)) = (&self.row_identifier, self.row()) {
            write!(f, ", row {}: {}", row, row_id)?;
        }
        write!(f, ")")?;
        if let Some(path) = self.resolved_index_path {
            write!(f, " @ {}", path)?;
        }
        Ok(())
    }
}
