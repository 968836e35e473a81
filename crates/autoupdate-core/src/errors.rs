use autoupdate_core_types::RequestId;
use thiserror::Error;

use crate::model::IndexPath;

/// Result type alias using AutoUpdateError
pub type Result<T> = std::result::Result<T, AutoUpdateError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling,
/// log assertions and CLI exit reporting. Every kind aborts the current
/// reconciliation pass; none of them is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Two sections, or two rows of one section, share an identifier
    IdentityViolation,
    /// A command's target cannot be located when it is about to execute
    ResolutionViolation,
    /// Incompatible positional reference types handed to the sorter
    UsageViolation,

    // Integration
    InvalidInput,
    Serialization,
    Io,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::IdentityViolation => "ERR_IDENTITY_VIOLATION",
            ExErrorKind::ResolutionViolation => "ERR_RESOLUTION_VIOLATION",
            ExErrorKind::UsageViolation => "ERR_USAGE_VIOLATION",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus whatever context was known at the point of
/// failure (operation, section, row, index path, pass id).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    section_id: Option<String>,
    row_id: Option<String>,
    index_path: Option<IndexPath>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            section_id: None,
            row_id: None,
            index_path: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add section identifier context
    pub fn with_section_id(mut self, id: impl Into<String>) -> Self {
        self.section_id = Some(id.into());
        self
    }

    /// Add row identifier context
    pub fn with_row_id(mut self, id: impl Into<String>) -> Self {
        self.row_id = Some(id.into());
        self
    }

    pub fn with_index_path(mut self, index_path: IndexPath) -> Self {
        self.index_path = Some(index_path);
        self
    }

    /// Add the reconciliation pass id
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn section_id(&self) -> Option<&str> {
        self.section_id.as_deref()
    }

    pub fn row_id(&self) -> Option<&str> {
        self.row_id.as_deref()
    }

    pub fn index_path(&self) -> Option<IndexPath> {
        self.index_path
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(section_id) = &self.section_id {
            write!(f, " (section_id: {})", section_id)?;
        }
        if let Some(row_id) = &self.row_id {
            write!(f, " (row_id: {})", row_id)?;
        }
        if let Some(index_path) = &self.index_path {
            write!(f, " (index_path: {})", index_path)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for diffing, sorting and executing commands
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AutoUpdateError {
    // ===== Identity Violations =====
    /// Two sections of one snapshot share an identifier
    #[error("Duplicate section identifier in {snapshot} snapshot: {section_id}")]
    DuplicateSection {
        snapshot: &'static str,
        section_id: String,
    },

    /// Two rows of one section share an identifier
    #[error("Duplicate row identifier {row_id} in section {section_id} of {snapshot} snapshot")]
    DuplicateRow {
        snapshot: &'static str,
        section_id: String,
        row_id: String,
    },

    // ===== Resolution Violations =====
    /// Section targeted by a command is not in the working layout
    #[error("Section not found while resolving {command_type}: {section_id}")]
    SectionNotFound {
        command_type: String,
        section_id: String,
    },

    /// Row targeted by a command is not in its section
    #[error("Row not found while resolving {command_type}: {row_id} in section {section_id}")]
    RowNotFound {
        command_type: String,
        section_id: String,
        row_id: String,
    },

    /// An insert targets an identifier the view already shows
    #[error("Target of {command_type} already present in section {section_id} (row: {row_id:?})")]
    TargetAlreadyPresent {
        command_type: String,
        section_id: String,
        row_id: Option<String>,
    },

    /// A command's index path was already fixed to a different position
    #[error("Command on section {section_id} already resolved to {existing}, refusing {requested}")]
    IndexPathAlreadyResolved {
        section_id: String,
        existing: IndexPath,
        requested: IndexPath,
    },

    // ===== Usage Violations =====
    /// Positional references of different kinds handed to one sort
    #[error("Cannot sort mixed positional references: found {first} and {second}")]
    MixedPositionRefs {
        first: &'static str,
        second: &'static str,
    },

    // ===== Input Errors =====
    /// Snapshot document could not be read
    #[error("Invalid snapshot: {reason}")]
    InvalidSnapshot { reason: String },
}

impl AutoUpdateError {
    /// Convenience accessor for the canonical kind of this error
    pub fn kind(&self) -> ExErrorKind {
        ExError::from(self.clone()).kind()
    }
}

impl From<AutoUpdateError> for ExError {
    fn from(err: AutoUpdateError) -> Self {
        let message = err.to_string();
        match err {
            AutoUpdateError::DuplicateSection { section_id, .. } => {
                ExError::new(ExErrorKind::IdentityViolation)
                    .with_section_id(section_id)
                    .with_message(message)
            }
            AutoUpdateError::DuplicateRow {
                section_id, row_id, ..
            } => ExError::new(ExErrorKind::IdentityViolation)
                .with_section_id(section_id)
                .with_row_id(row_id)
                .with_message(message),
            AutoUpdateError::SectionNotFound { section_id, .. } => {
                ExError::new(ExErrorKind::ResolutionViolation)
                    .with_section_id(section_id)
                    .with_message(message)
            }
            AutoUpdateError::RowNotFound {
                section_id, row_id, ..
            } => ExError::new(ExErrorKind::ResolutionViolation)
                .with_section_id(section_id)
                .with_row_id(row_id)
                .with_message(message),
            AutoUpdateError::TargetAlreadyPresent {
                section_id, row_id, ..
            } => {
                let ex = ExError::new(ExErrorKind::ResolutionViolation)
                    .with_section_id(section_id)
                    .with_message(message);
                match row_id {
                    Some(row_id) => ex.with_row_id(row_id),
                    None => ex,
                }
            }
            AutoUpdateError::IndexPathAlreadyResolved {
                section_id,
                existing,
                ..
            } => ExError::new(ExErrorKind::ResolutionViolation)
                .with_section_id(section_id)
                .with_index_path(existing)
                .with_message(message),
            AutoUpdateError::MixedPositionRefs { .. } => {
                ExError::new(ExErrorKind::UsageViolation).with_message(message)
            }
            AutoUpdateError::InvalidSnapshot { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for AutoUpdateError {
    fn from(err: serde_json::Error) -> Self {
        AutoUpdateError::InvalidSnapshot {
            reason: err.to_string(),
        }
    }
}
