pub mod diff;
pub mod replay;

use std::path::Path;

use autoupdate_core::errors::{AutoUpdateError, ExError, ExErrorKind};
use autoupdate_core::Snapshot;
use serde::Serialize;
use serde_json::Value;

/// Read and parse a snapshot document
pub fn load_snapshot(path: &Path, op: &str) -> Result<Snapshot<Value>, ExError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op(op)
            .with_message(format!("{}: {}", path.display(), e))
    })?;
    serde_json::from_str(&text)
        .map_err(|e| ExError::from(AutoUpdateError::from(e)).with_op(op))
}

/// Pretty-print `value` as JSON on stdout
pub fn print_json<T: Serialize>(value: &T, op: &str) -> Result<(), ExError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op(op)
            .with_message(e.to_string())
    })?;
    println!("{}", text);
    Ok(())
}
