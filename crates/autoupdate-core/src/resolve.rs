//! Just-in-time position resolution
//!
//! The resolver tracks the view's structure as a [`Layout`], starting from the
//! old snapshot. Each command is located by identifier in the layout as it is
//! *now*, after every previously applied command. This makes resolution
//! independent of the provisional positions the diff engine recorded.
//!
//! Inserts are placed directly after the nearest predecessor (in new-snapshot
//! order) that the view already shows, or at position 0 when there is none.
//! Applied in descending order, this reproduces the new snapshot's relative
//! order for every inserted element.
//!
//! Alongside the layout the resolver keeps a hash index of the identifiers it
//! currently shows, so the predecessor walk for an insert costs O(1) per step
//! and only the predecessor it settles on is located by position.

use std::collections::{HashMap, HashSet};

use crate::commands::{Command, CommandType};
use crate::errors::{AutoUpdateError, Result};
use crate::model::{IndexPath, Layout, Snapshot};

pub(crate) struct Resolver<'n, C> {
    layout: Layout,
    /// Section id -> ids of the rows that section currently shows
    shown: HashMap<String, HashSet<String>>,
    new: &'n Snapshot<C>,
}

impl<'n, C> Resolver<'n, C> {
    pub(crate) fn new(layout: Layout, new: &'n Snapshot<C>) -> Self {
        let shown = layout
            .sections
            .iter()
            .map(|s| (s.id.clone(), s.rows.iter().cloned().collect()))
            .collect();
        Self { layout, shown, new }
    }

    pub(crate) fn into_layout(self) -> Layout {
        self.layout
    }

    /// Concrete position `command` executes at, given the current layout.
    ///
    /// # Errors
    ///
    /// * `SectionNotFound` / `RowNotFound` - the target is not where the
    ///   command set says it should be
    /// * `TargetAlreadyPresent` - an insert targets an identifier the view
    ///   already shows
    pub(crate) fn resolve(&self, command: &Command) -> Result<IndexPath> {
        let section_id = command.section_identifier();
        match command.command_type() {
            CommandType::RemoveSection => {
                let section = self.layout_section(command)?;
                Ok(IndexPath::section(section))
            }
            CommandType::AddSection => {
                if self.shown.contains_key(section_id) {
                    return Err(already_present(command));
                }
                let new_position = self
                    .new
                    .section_position(section_id)
                    .ok_or_else(|| section_not_found(command))?;
                let section = self.new.sections()[..new_position]
                    .iter()
                    .rev()
                    .find(|s| self.shown.contains_key(s.id()))
                    .and_then(|s| self.layout.section_position(s.id()))
                    .map_or(0, |p| p + 1);
                Ok(IndexPath::section(section))
            }
            CommandType::RemoveRow { .. } | CommandType::UpdateRow { .. } => {
                let section = self.layout_section(command)?;
                let row = self.layout.sections[section]
                    .row_position(row_id(command))
                    .ok_or_else(|| row_not_found(command))?;
                Ok(IndexPath::row(section, row))
            }
            CommandType::AddRow { .. } => {
                let section = self.layout_section(command)?;
                let shown_rows = self
                    .shown
                    .get(section_id)
                    .ok_or_else(|| section_not_found(command))?;
                if shown_rows.contains(row_id(command)) {
                    return Err(already_present(command));
                }
                let new_section = self
                    .new
                    .section(section_id)
                    .ok_or_else(|| section_not_found(command))?;
                let new_row = new_section
                    .row_position(row_id(command))
                    .ok_or_else(|| row_not_found(command))?;
                let row = new_section.rows()[..new_row]
                    .iter()
                    .rev()
                    .find(|r| shown_rows.contains(r.id()))
                    .and_then(|r| self.layout.sections[section].row_position(r.id()))
                    .map_or(0, |p| p + 1);
                Ok(IndexPath::row(section, row))
            }
        }
    }

    /// Mirror the primitive mutation for `command` at `index_path` in the layout
    pub(crate) fn apply(&mut self, command: &Command, index_path: IndexPath) {
        let section_id = command.section_identifier();
        match (command.command_type(), index_path.row) {
            (CommandType::RemoveSection, _) => {
                self.layout.remove_section(index_path.section);
                self.shown.remove(section_id);
            }
            (CommandType::AddSection, _) => {
                self.layout.insert_section(index_path.section, section_id);
                self.shown.insert(section_id.to_string(), HashSet::new());
            }
            (CommandType::RemoveRow { .. }, Some(row)) => {
                self.layout.remove_row(index_path.section, row);
                if let Some(rows) = self.shown.get_mut(section_id) {
                    rows.remove(row_id(command));
                }
            }
            (CommandType::AddRow { .. }, Some(row)) => {
                self.layout
                    .insert_row(index_path.section, row, row_id(command));
                self.shown
                    .entry(section_id.to_string())
                    .or_default()
                    .insert(row_id(command).to_string());
            }
            (CommandType::UpdateRow { .. }, _) => {}
            // Row-level commands always resolve to row-level paths
            (CommandType::RemoveRow { .. } | CommandType::AddRow { .. }, None) => {}
        }
    }

    fn layout_section(&self, command: &Command) -> Result<usize> {
        self.layout
            .section_position(command.section_identifier())
            .ok_or_else(|| section_not_found(command))
    }
}

fn row_id(command: &Command) -> &str {
    command.row_identifier().unwrap_or_default()
}

fn section_not_found(command: &Command) -> AutoUpdateError {
    AutoUpdateError::SectionNotFound {
        command_type: command.command_type().name().to_string(),
        section_id: command.section_identifier().to_string(),
    }
}

fn row_not_found(command: &Command) -> AutoUpdateError {
    AutoUpdateError::RowNotFound {
        command_type: command.command_type().name().to_string(),
        section_id: command.section_identifier().to_string(),
        row_id: row_id(command).to_string(),
    }
}

fn already_present(command: &Command) -> AutoUpdateError {
    AutoUpdateError::TargetAlreadyPresent {
        command_type: command.command_type().name().to_string(),
        section_id: command.section_identifier().to_string(),
        row_id: command.row_identifier().map(str::to_string),
    }
}
