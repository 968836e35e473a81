//! Core types shared by the AutoUpdate facilities
//!
//! - **Correlation**: `RequestId` tagging one reconciliation pass
//! - **Schema constants**: canonical field keys and event names for structured logging

pub mod correlation;
pub mod schema;

pub use correlation::RequestId;
