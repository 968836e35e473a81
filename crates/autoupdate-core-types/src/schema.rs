//! Canonical schema constants for structured logging
//!
//! These keys are shared by the logging macros, the coordinator's per-command
//! events and the test capture layer.

// Canonical field keys
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Collection identifiers
pub const FIELD_SECTION_ID: &str = "section_id";
pub const FIELD_ROW_ID: &str = "row_id";
pub const FIELD_COMMAND_TYPE: &str = "command_type";
pub const FIELD_INDEX_PATH: &str = "index_path";

// Collection sizes
pub const FIELD_COMMAND_COUNT: &str = "command_count";
pub const FIELD_OLD_SECTION_COUNT: &str = "old_section_count";
pub const FIELD_NEW_SECTION_COUNT: &str = "new_section_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_COMMAND: &str = "command";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_distinct() {
        let names = [EVENT_START, EVENT_END, EVENT_END_ERROR, EVENT_COMMAND];
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_error_fields_are_namespaced() {
        assert!(FIELD_ERR_KIND.starts_with("err."));
        assert!(FIELD_ERR_CODE.starts_with("err."));
    }
}
