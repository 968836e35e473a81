#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Logging Facility Tests
//!
//! All tests share one global capture, so each filters on an op name or
//! identifier no other test uses.
//!
//! ## Scenarios Covered
//!
//! 1. Macros emit start/end/end_error with schema fields
//! 2. Errors are classified into `err.kind` / `err.code`
//! 3. A reconciliation pass logs one start and one end
//! 4. Every executed command emits a `command` event with its resolved path
//! 5. An identity violation logs end_error for diffing and the pass

mod common;

use autoupdate_core::errors::AutoUpdateError;
use autoupdate_core::logging_facility::test_capture::init_test_capture;
use autoupdate_core::{log_op_end, log_op_error, log_op_start, run_commands, NoopObserver};
use autoupdate_core_types::schema::{
    EVENT_COMMAND, EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_COMMAND_TYPE, FIELD_ERR_CODE,
    FIELD_ERR_KIND, FIELD_INDEX_PATH, FIELD_SECTION_ID,
};
use common::{ids, ModelSource, RecordingView};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, section_id = "s1");

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].field("section_id"), Some("s1"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42, command_count = 7usize);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].field("duration_ms"), Some("42"));
    assert_eq!(events[0].field("command_count"), Some("7"));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = AutoUpdateError::RowNotFound {
        command_type: "remove_row".to_string(),
        section_id: "s1".to_string(),
        row_id: "r1".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one error event");
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].field(FIELD_ERR_CODE), Some("ERR_RESOLUTION_VIOLATION"));
    assert_eq!(events[0].field(FIELD_ERR_KIND), Some("ResolutionViolation"));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_pass_logs_boundaries_and_commands() {
    let capture = init_test_capture();
    let mut source = ModelSource {
        current: ids(&[("log_pass_sec", &["lp1", "lp2"])]),
    };
    let mut view = RecordingView::for_snapshot(&source.current);

    // WHEN a pass removes one row and adds another
    run_commands(
        &mut source,
        &mut view,
        |s| s.current = ids(&[("log_pass_sec", &["lp2", "lp3"])]),
        NoopObserver,
    )
    .unwrap();

    // THEN each executed command logged its kind and resolved path
    let commands = capture.command_events_where(FIELD_SECTION_ID, "log_pass_sec");
    assert_eq!(commands.len(), 2);
    assert!(commands.iter().all(|e| e.event.as_deref() == Some(EVENT_COMMAND)));
    let add = commands
        .iter()
        .find(|e| e.field(FIELD_COMMAND_TYPE) == Some("add_row"))
        .expect("add_row event");
    assert_eq!(add.field(FIELD_INDEX_PATH), Some("(0, 2)"));
    let remove = commands
        .iter()
        .find(|e| e.field(FIELD_COMMAND_TYPE) == Some("remove_row"))
        .expect("remove_row event");
    assert_eq!(remove.field(FIELD_INDEX_PATH), Some("(0, 0)"));

    capture.assert_event_exists("run_commands", EVENT_START);
    capture.assert_event_exists("run_commands", EVENT_END);
}

#[test]
fn test_identity_violation_logs_end_error() {
    let capture = init_test_capture();
    let mut source = ModelSource {
        current: ids(&[("dup_log_sec", &[])]),
    };
    let mut view = RecordingView::for_snapshot(&source.current);

    let result = run_commands(
        &mut source,
        &mut view,
        |s| s.current = ids(&[("dup_log_sec", &["x", "x"])]),
        NoopObserver,
    );

    assert!(result.is_err());
    let errors = capture.count_events(|e| {
        e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field(FIELD_ERR_CODE) == Some("ERR_IDENTITY_VIOLATION")
            && matches!(e.op.as_deref(), Some("run_commands") | Some("compute_commands"))
    });
    assert!(errors >= 2, "diff and pass should both log end_error");
}
