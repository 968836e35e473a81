//! Canonical logging macros
//!
//! `compute_commands` and `run_commands` each log exactly one start and one
//! end (or end_error) event carrying the fields from
//! `autoupdate_core_types::schema`. A `run_commands` pass also tags both of
//! its events with the pass's `request_id`.

/// Log the start of an operation
///
/// Extra fields describe the input, e.g. the section counts of the two
/// snapshots being diffed or the request id of a reload pass.
///
/// # Example
///
/// ```
/// # use autoupdate_core::log_op_start;
/// log_op_start!("run_commands");
/// log_op_start!("compute_commands", old_section_count = 3, new_section_count = 4);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = autoupdate_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = autoupdate_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// `command_count` is the size of the command set that was computed or
/// executed against the view.
///
/// # Example
///
/// ```
/// # use autoupdate_core::log_op_end;
/// log_op_end!("compute_commands", duration_ms = 3);
/// log_op_end!("run_commands", duration_ms = 3, command_count = 12);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = autoupdate_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = autoupdate_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error, classified through `ExError`
///
/// `err.code` tells the failure classes apart: a duplicate identifier in a
/// snapshot logs `ERR_IDENTITY_VIOLATION` from `compute_commands`, while a
/// command whose target is missing from the working layout logs
/// `ERR_RESOLUTION_VIOLATION` from `run_commands`.
///
/// # Example
///
/// ```
/// # use autoupdate_core::{log_op_error, errors::AutoUpdateError};
/// let err = AutoUpdateError::SectionNotFound {
///     command_type: "remove_section".to_string(),
///     section_id: "s1".to_string(),
/// };
/// log_op_error!("run_commands", err, duration_ms = 1, request_id = "0190");
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = autoupdate_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = autoupdate_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            $($field)*
        );
    }};
}
